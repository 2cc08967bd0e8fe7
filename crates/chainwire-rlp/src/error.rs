use thiserror::Error;

/// Errors produced by RLP encoding and decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RlpError {
    #[error("malformed encoding: {0}")]
    Decode(&'static str),

    #[error("payload length mismatch: header declares {declared} bytes, {available} available")]
    PayloadLength { declared: usize, available: usize },

    #[error("{0} trailing bytes after item")]
    Trailing(usize),

    #[error("integer too large: {0} bytes (max 16)")]
    IntTooLarge(usize),
}

pub type RlpResult<T> = Result<T, RlpError>;
