use thiserror::Error;

use chainwire_id::IdError;
use chainwire_rlp::RlpError;

use crate::kind::TxKind;

/// Errors produced by transaction building and unpacking.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TxError {
    #[error("unknown transaction tag: {0}")]
    UnknownTag(u128),

    #[error("no schema registered for {kind:?} version {version}")]
    SchemaNotFound { kind: TxKind, version: u8 },

    #[error("missing required field: {0}")]
    MissingParam(&'static str),

    #[error("invalid value for field {field}: {reason}")]
    InvalidParam {
        field: &'static str,
        reason: String,
    },

    #[error("expected {expected:?}, decoded {actual:?}")]
    KindMismatch { expected: TxKind, actual: TxKind },

    #[error("field count mismatch for {kind:?} v{version}: schema has {expected}, wire has {actual}")]
    Arity {
        kind: TxKind,
        version: u8,
        expected: usize,
        actual: usize,
    },

    #[error("transaction nesting deeper than {0} levels")]
    NestingTooDeep(usize),

    #[error(transparent)]
    Rlp(#[from] RlpError),

    #[error(transparent)]
    Id(#[from] IdError),
}

pub type TxResult<T> = Result<T, TxError>;
