//! Versioned transaction schemas and the build/unpack codec.
//!
//! Every transaction on the wire is an RLP list whose first two elements
//! are (kind tag, schema version) — the fixed envelope — followed by the
//! schema-ordered fields. This crate holds the three pieces that turn
//! named parameters into those bytes and back:
//!
//! - [`FieldType`]/[`FieldValue`] — the closed set of field shapes and the
//!   per-type serialize/deserialize pairs, including recursive embedded
//!   transactions
//! - [`TxSchema`] and the static registry — ordered field layouts per
//!   (kind, version), resolved at build and decode time
//! - [`build`]/[`unpack`] — the orchestration, with structural and
//!   constraint validation and typed failures throughout
//!
//! All registries are populated once at first use and shared read-only, so
//! every operation here is safe to call concurrently.

pub mod codec;
pub mod error;
pub mod field;
pub mod kind;
pub mod record;
pub mod schema;

pub use codec::{build, unpack};
pub use error::{TxError, TxResult};
pub use field::{FieldType, FieldValue, Pointer, Ttl, MAX_TX_DEPTH};
pub use kind::TxKind;
pub use record::TxRecord;
pub use schema::{default_version, resolve_schema, FieldSpec, TxSchema};
