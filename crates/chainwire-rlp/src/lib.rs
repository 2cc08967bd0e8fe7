//! Canonical recursive length-prefixed (RLP) encoding.
//!
//! The byte layer underneath the chainwire transaction format: byte strings
//! and ordered lists of byte strings, length-prefixed, with integers carried
//! as minimal big-endian byte strings (empty string = zero).
//!
//! Decoding is strict. There is exactly one valid byte representation for a
//! given logical value, and every non-canonical alternative (non-minimal
//! headers, padded integers, trailing bytes) is rejected.

pub mod decode;
pub mod encode;
pub mod error;
pub mod item;

pub use decode::decode;
pub use encode::encode;
pub use error::{RlpError, RlpResult};
pub use item::{bytes_to_uint, uint_to_bytes, RlpItem};
