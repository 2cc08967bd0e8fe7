//! Merkle-Patricia-Trie proof verification.
//!
//! A light client holds a trusted 32-byte state root and receives a bag of
//! serialized trie nodes from an untrusted peer. [`Proof`] walks a key's
//! nibble path through those nodes and either finds the value, demonstrates
//! the key's absence, or fails because the proof is incomplete or forged.
//!
//! Node references are blake3 hashes over the node's canonical encoding, so
//! [`Proof::verify_inclusion`] can detect any substituted node by re-hashing
//! it against the reference its parent committed to.

pub mod error;
pub mod nibbles;
pub mod node;
pub mod proof;

pub use error::{MptError, MptResult};
pub use nibbles::Nibbles;
pub use node::{Node, NodeHash, NodeRef};
pub use proof::{Lookup, Proof};
