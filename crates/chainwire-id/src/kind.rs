use serde::{Deserialize, Serialize};

/// Entity kinds carried as typed binary identifiers on the wire.
///
/// The tag byte prefixes the 32-byte payload in the binary form; the
/// textual prefix selects the kind in the human-readable form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdKind {
    Account,
    Name,
    Commitment,
    Oracle,
    Contract,
    Channel,
}

impl IdKind {
    pub const ALL: [IdKind; 6] = [
        IdKind::Account,
        IdKind::Name,
        IdKind::Commitment,
        IdKind::Oracle,
        IdKind::Contract,
        IdKind::Channel,
    ];

    /// Wire tag byte.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Account => 1,
            Self::Name => 2,
            Self::Commitment => 3,
            Self::Oracle => 4,
            Self::Contract => 5,
            Self::Channel => 6,
        }
    }

    /// Parse a wire tag byte.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Account),
            2 => Some(Self::Name),
            3 => Some(Self::Commitment),
            4 => Some(Self::Oracle),
            5 => Some(Self::Contract),
            6 => Some(Self::Channel),
            _ => None,
        }
    }

    /// Textual address prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Account => "ak",
            Self::Name => "nm",
            Self::Commitment => "cm",
            Self::Oracle => "ok",
            Self::Contract => "ct",
            Self::Channel => "ch",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.prefix() == prefix)
    }
}

/// Non-identifier entities rendered with the same prefix/checksum scheme:
/// transaction and block hashes, signatures, serialized trees and proofs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashKind {
    TxHash,
    KeyBlockHash,
    MicroBlockHash,
    Signature,
    StateTrees,
    Poi,
    Transaction,
    ByteArray,
}

impl HashKind {
    pub const ALL: [HashKind; 8] = [
        HashKind::TxHash,
        HashKind::KeyBlockHash,
        HashKind::MicroBlockHash,
        HashKind::Signature,
        HashKind::StateTrees,
        HashKind::Poi,
        HashKind::Transaction,
        HashKind::ByteArray,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            Self::TxHash => "th",
            Self::KeyBlockHash => "kh",
            Self::MicroBlockHash => "mh",
            Self::Signature => "sg",
            Self::StateTrees => "ss",
            Self::Poi => "pi",
            Self::Transaction => "tx",
            Self::ByteArray => "ba",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.prefix() == prefix)
    }

    /// Required payload length, or `None` for variable-length kinds.
    pub fn payload_len(&self) -> Option<usize> {
        match self {
            Self::TxHash | Self::KeyBlockHash | Self::MicroBlockHash => Some(32),
            Self::Signature => Some(64),
            Self::StateTrees | Self::Poi | Self::Transaction | Self::ByteArray => None,
        }
    }
}

/// A registered address prefix: either a typed identifier or a hash kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prefix {
    Id(IdKind),
    Hash(HashKind),
}

impl Prefix {
    /// Look up a textual prefix in the fixed registry.
    pub fn lookup(prefix: &str) -> Option<Self> {
        IdKind::from_prefix(prefix)
            .map(Self::Id)
            .or_else(|| HashKind::from_prefix(prefix).map(Self::Hash))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id(k) => k.prefix(),
            Self::Hash(k) => k.prefix(),
        }
    }
}
