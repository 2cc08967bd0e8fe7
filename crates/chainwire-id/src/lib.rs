//! Typed chain identifiers and their textual addresses.
//!
//! An [`Id`] is a kind tag plus a 32-byte payload (account key, contract
//! address, oracle id, name hash, channel id, commitment). On the wire it
//! travels in binary; for humans it renders as
//! `<prefix>_<base58(payload ‖ checksum4)>` with a double-SHA-256 checksum.
//!
//! The same scheme, with different registered prefixes, renders transaction
//! hashes, block hashes, signatures, and serialized proof payloads — see
//! [`HashKind`] and the free functions in [`address`].

pub mod address;
pub mod error;
pub mod id;
pub mod kind;

pub use address::{checksum, decode_any, decode_data, encode_check, encode_data};
pub use error::{IdError, IdResult};
pub use id::{Id, ID_WIRE_LEN};
pub use kind::{HashKind, IdKind, Prefix};
