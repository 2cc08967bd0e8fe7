use serde::{Deserialize, Serialize};

use chainwire_id::{Id, IdKind};
use chainwire_rlp::RlpItem;

use crate::codec;
use crate::error::{TxError, TxResult};
use crate::record::TxRecord;

/// Maximum depth for transactions embedding other transactions.
///
/// Bounds stack usage on both build and unpack; deeper inputs fail with
/// [`TxError::NestingTooDeep`].
pub const MAX_TX_DEPTH: usize = 8;

/// The closed set of field shapes a schema can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    /// Unsigned integer, carried as minimal big-endian bytes.
    UInt,
    /// Raw bytes, any length.
    Binary,
    /// Raw bytes of exactly this length.
    FixedBinary(usize),
    /// Ordered list of raw byte strings (e.g. signatures).
    BinaryList,
    /// Identifier restricted to the given kind subset.
    Id(&'static [IdKind]),
    /// Ordered identifier list, each restricted to the kind subset.
    IdList(&'static [IdKind]),
    /// Ordered key/identifier pairs used by naming records.
    Pointers,
    /// Time-to-live descriptor.
    Ttl,
    /// Embedded transaction, encoded recursively as one byte string.
    Tx,
    /// Opaque 32-byte state-tree root reference.
    StateHash,
}

/// A named pointer from a key to a chain entity, used by name records.
///
/// Wire order is preserved and duplicate keys pass through untouched;
/// deduplication is a policy question for higher layers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pointer {
    pub key: String,
    pub id: Id,
}

/// Time-to-live, counted from now (relative) or as a chain height
/// (absolute).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ttl {
    Relative(u64),
    Absolute(u64),
}

impl Ttl {
    fn discriminant(&self) -> u64 {
        match self {
            Self::Relative(_) => 0,
            Self::Absolute(_) => 1,
        }
    }

    pub fn value(&self) -> u64 {
        match self {
            Self::Relative(v) | Self::Absolute(v) => *v,
        }
    }
}

/// A typed field value, mirroring [`FieldType`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    UInt(u128),
    Binary(Vec<u8>),
    BinaryList(Vec<Vec<u8>>),
    Id(Id),
    IdList(Vec<Id>),
    Pointers(Vec<Pointer>),
    Ttl(Ttl),
    Tx(Box<TxRecord>),
    StateHash([u8; 32]),
}

fn type_mismatch(field: &'static str, ty: FieldType, value: &FieldValue) -> TxError {
    TxError::InvalidParam {
        field,
        reason: format!("expected {ty:?}, got {value:?}"),
    }
}

fn check_kind(field: &'static str, allowed: &[IdKind], id: &Id, index: Option<usize>) -> TxResult<()> {
    if allowed.contains(&id.kind) {
        return Ok(());
    }
    let reason = match index {
        Some(i) => format!("entry {i}: kind {:?} not in allowed set {allowed:?}", id.kind),
        None => format!("kind {:?} not in allowed set {allowed:?}", id.kind),
    };
    Err(TxError::InvalidParam { field, reason })
}

/// Serialize one field value to its wire unit, enforcing the field type's
/// constraints.
pub fn serialize(field: &'static str, ty: FieldType, value: &FieldValue, depth: usize) -> TxResult<RlpItem> {
    match (ty, value) {
        (FieldType::UInt, FieldValue::UInt(v)) => Ok(RlpItem::uint(*v)),
        (FieldType::Binary, FieldValue::Binary(b)) => Ok(RlpItem::bytes(b.clone())),
        (FieldType::FixedBinary(len), FieldValue::Binary(b)) => {
            if b.len() != len {
                return Err(TxError::InvalidParam {
                    field,
                    reason: format!("expected {len} bytes, got {}", b.len()),
                });
            }
            Ok(RlpItem::bytes(b.clone()))
        }
        (FieldType::BinaryList, FieldValue::BinaryList(items)) => Ok(RlpItem::list(
            items.iter().map(|b| RlpItem::bytes(b.clone())).collect(),
        )),
        (FieldType::Id(allowed), FieldValue::Id(id)) => {
            check_kind(field, allowed, id, None)?;
            Ok(RlpItem::bytes(id.to_wire()))
        }
        (FieldType::IdList(allowed), FieldValue::IdList(ids)) => {
            let mut items = Vec::with_capacity(ids.len());
            for (i, id) in ids.iter().enumerate() {
                check_kind(field, allowed, id, Some(i))?;
                items.push(RlpItem::bytes(id.to_wire()));
            }
            Ok(RlpItem::list(items))
        }
        (FieldType::Pointers, FieldValue::Pointers(pointers)) => Ok(RlpItem::list(
            pointers
                .iter()
                .map(|p| {
                    RlpItem::list(vec![
                        RlpItem::bytes(p.key.as_bytes().to_vec()),
                        RlpItem::bytes(p.id.to_wire()),
                    ])
                })
                .collect(),
        )),
        (FieldType::Ttl, FieldValue::Ttl(ttl)) => Ok(RlpItem::list(vec![
            RlpItem::uint(ttl.discriminant().into()),
            RlpItem::uint(ttl.value().into()),
        ])),
        (FieldType::Tx, FieldValue::Tx(inner)) => {
            let bytes = codec::build_record_at_depth(inner, depth + 1)?;
            Ok(RlpItem::bytes(bytes))
        }
        (FieldType::StateHash, FieldValue::StateHash(hash)) => Ok(RlpItem::bytes(hash.to_vec())),
        (ty, value) => Err(type_mismatch(field, ty, value)),
    }
}

/// Deserialize one wire unit back into a typed field value.
pub fn deserialize(field: &'static str, ty: FieldType, item: &RlpItem, depth: usize) -> TxResult<FieldValue> {
    match ty {
        FieldType::UInt => Ok(FieldValue::UInt(item.as_uint()?)),
        FieldType::Binary => Ok(FieldValue::Binary(item.as_bytes()?.to_vec())),
        FieldType::FixedBinary(len) => {
            let bytes = item.as_bytes()?;
            if bytes.len() != len {
                return Err(TxError::InvalidParam {
                    field,
                    reason: format!("expected {len} bytes, got {}", bytes.len()),
                });
            }
            Ok(FieldValue::Binary(bytes.to_vec()))
        }
        FieldType::BinaryList => {
            let items = item.as_list()?;
            let mut out = Vec::with_capacity(items.len());
            for entry in items {
                out.push(entry.as_bytes()?.to_vec());
            }
            Ok(FieldValue::BinaryList(out))
        }
        FieldType::Id(allowed) => {
            let id = Id::from_wire(item.as_bytes()?)?;
            check_kind(field, allowed, &id, None)?;
            Ok(FieldValue::Id(id))
        }
        FieldType::IdList(allowed) => {
            let items = item.as_list()?;
            let mut ids = Vec::with_capacity(items.len());
            for (i, entry) in items.iter().enumerate() {
                let id = Id::from_wire(entry.as_bytes()?)?;
                check_kind(field, allowed, &id, Some(i))?;
                ids.push(id);
            }
            Ok(FieldValue::IdList(ids))
        }
        FieldType::Pointers => {
            let items = item.as_list()?;
            let mut pointers = Vec::with_capacity(items.len());
            for entry in items {
                let pair = entry.as_list()?;
                if pair.len() != 2 {
                    return Err(TxError::InvalidParam {
                        field,
                        reason: format!("pointer needs 2 elements, got {}", pair.len()),
                    });
                }
                let key = String::from_utf8(pair[0].as_bytes()?.to_vec()).map_err(|e| {
                    TxError::InvalidParam {
                        field,
                        reason: format!("pointer key is not UTF-8: {e}"),
                    }
                })?;
                let id = Id::from_wire(pair[1].as_bytes()?)?;
                pointers.push(Pointer { key, id });
            }
            Ok(FieldValue::Pointers(pointers))
        }
        FieldType::Ttl => {
            let pair = item.as_list()?;
            if pair.len() != 2 {
                return Err(TxError::InvalidParam {
                    field,
                    reason: format!("ttl needs 2 elements, got {}", pair.len()),
                });
            }
            let value = u64::try_from(pair[1].as_uint()?).map_err(|_| TxError::InvalidParam {
                field,
                reason: "ttl value exceeds 64 bits".to_string(),
            })?;
            match pair[0].as_uint()? {
                0 => Ok(FieldValue::Ttl(Ttl::Relative(value))),
                1 => Ok(FieldValue::Ttl(Ttl::Absolute(value))),
                other => Err(TxError::InvalidParam {
                    field,
                    reason: format!("unknown ttl discriminant: {other}"),
                }),
            }
        }
        FieldType::Tx => {
            let inner = codec::unpack_at_depth(item.as_bytes()?, None, depth + 1)?;
            Ok(FieldValue::Tx(Box::new(inner)))
        }
        FieldType::StateHash => {
            let bytes = item.as_bytes()?;
            let hash: [u8; 32] = bytes.try_into().map_err(|_| TxError::InvalidParam {
                field,
                reason: format!("state hash needs 32 bytes, got {}", bytes.len()),
            })?;
            Ok(FieldValue::StateHash(hash))
        }
    }
}
