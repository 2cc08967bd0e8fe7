use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::{decode_any, encode_check};
use crate::error::{IdError, IdResult};
use crate::kind::{IdKind, Prefix};

/// Typed binary identifier for a chain entity.
///
/// The wire form is the kind's tag byte followed by the 32-byte payload;
/// the textual form is `<prefix>_<base58(payload ‖ checksum)>`. The two
/// conversions are exact inverses.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id {
    pub kind: IdKind,
    pub payload: [u8; 32],
}

pub const ID_WIRE_LEN: usize = 33;

impl Id {
    pub fn new(kind: IdKind, payload: [u8; 32]) -> Self {
        Self { kind, payload }
    }

    /// Length-checked construction from a byte slice.
    pub fn from_slice(kind: IdKind, payload: &[u8]) -> IdResult<Self> {
        let payload: [u8; 32] = payload.try_into().map_err(|_| IdError::PayloadLength {
            prefix: kind.prefix(),
            expected: 32,
            actual: payload.len(),
        })?;
        Ok(Self { kind, payload })
    }

    /// Human-readable textual address.
    pub fn to_address(&self) -> String {
        encode_check(self.kind.prefix(), &self.payload)
    }

    /// Parse a textual address into a typed identifier.
    pub fn from_address(input: &str) -> IdResult<Self> {
        match decode_any(input)? {
            (Prefix::Id(kind), payload) => Self::from_slice(kind, &payload),
            (Prefix::Hash(kind), _) => Err(IdError::PrefixNotFound(kind.prefix().to_string())),
        }
    }

    /// Tag-prefixed binary form carried inside transactions.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(ID_WIRE_LEN);
        out.push(self.kind.tag());
        out.extend_from_slice(&self.payload);
        out
    }

    /// Parse the tag-prefixed binary form.
    pub fn from_wire(bytes: &[u8]) -> IdResult<Self> {
        let (&tag, payload) = bytes.split_first().ok_or(IdError::UnknownTag(0))?;
        let kind = IdKind::from_tag(tag).ok_or(IdError::UnknownTag(tag))?;
        Self::from_slice(kind, payload)
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.to_address())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_address())
    }
}
