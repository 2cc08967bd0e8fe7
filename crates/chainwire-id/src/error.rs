use thiserror::Error;

/// Errors produced by identifier and address operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("unknown address prefix: {0}")]
    PrefixNotFound(String),

    #[error("address checksum mismatch")]
    InvalidChecksum,

    #[error("invalid base58: {0}")]
    Base58(String),

    #[error("missing '_' separator in address")]
    MissingSeparator,

    #[error("address too short to carry a checksum")]
    TooShort,

    #[error("invalid payload length for {prefix}: expected {expected}, got {actual}")]
    PayloadLength {
        prefix: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("unknown identifier tag byte: {0}")]
    UnknownTag(u8),
}

pub type IdResult<T> = Result<T, IdError>;
