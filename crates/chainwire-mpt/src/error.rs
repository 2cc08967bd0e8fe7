use thiserror::Error;

use chainwire_rlp::RlpError;

use crate::node::NodeHash;

/// Errors produced by proof decoding and verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MptError {
    #[error("referenced node not present in proof: {0}")]
    MissingNode(NodeHash),

    #[error("node hash mismatch: parent declared {declared}, computed {computed}")]
    HashMismatch {
        declared: NodeHash,
        computed: NodeHash,
    },

    #[error("node has {0} elements; a node is 2 (leaf/extension) or 17 (branch)")]
    UnknownNodeLength(usize),

    #[error("invalid path flag nibble: {0}")]
    UnknownPathNibble(u8),

    #[error("malformed node: {0}")]
    Decode(&'static str),

    #[error("key is provably absent under the given root")]
    KeyAbsent,

    #[error("proof carries value {found} for the key, expected {expected}")]
    ValueMismatch { expected: String, found: String },

    #[error(transparent)]
    Rlp(#[from] RlpError),
}

pub type MptResult<T> = Result<T, MptError>;
