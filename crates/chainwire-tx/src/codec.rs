use std::collections::HashMap;

use chainwire_rlp::{self as rlp, RlpError, RlpItem};

use crate::error::{TxError, TxResult};
use crate::field::{self, FieldValue, MAX_TX_DEPTH};
use crate::kind::TxKind;
use crate::record::TxRecord;
use crate::schema::resolve_schema;

/// Build transaction bytes from named parameters.
///
/// Resolves the schema (defaulting the version), checks field presence and
/// constraints, and encodes the envelope `[tag, version, fields...]`.
pub fn build(
    kind: TxKind,
    version: Option<u8>,
    fields: &HashMap<String, FieldValue>,
) -> TxResult<Vec<u8>> {
    let record = TxRecord::from_fields(kind, version, fields)?;
    build_record_at_depth(&record, 0)
}

/// Decode transaction bytes into a named-field record.
///
/// The leading two envelope elements select the schema; the remaining
/// elements are decoded positionally against it. If `expected` is given,
/// a different decoded kind is an error.
pub fn unpack(bytes: &[u8], expected: Option<TxKind>) -> TxResult<TxRecord> {
    unpack_at_depth(bytes, expected, 0)
}

pub(crate) fn build_record_at_depth(record: &TxRecord, depth: usize) -> TxResult<Vec<u8>> {
    if depth >= MAX_TX_DEPTH {
        return Err(TxError::NestingTooDeep(MAX_TX_DEPTH));
    }
    let schema = resolve_schema(record.kind(), Some(record.version()))?;
    tracing::debug!(kind = ?record.kind(), version = record.version(), "building transaction");

    let mut items = Vec::with_capacity(schema.fields.len() + 2);
    items.push(RlpItem::uint(record.kind().tag().into()));
    items.push(RlpItem::uint(record.version().into()));
    for spec in schema.fields {
        let value = record
            .get(spec.name)
            .ok_or(TxError::MissingParam(spec.name))?;
        items.push(field::serialize(spec.name, spec.ty, value, depth)?);
    }
    Ok(rlp::encode(&RlpItem::List(items)))
}

pub(crate) fn unpack_at_depth(
    bytes: &[u8],
    expected: Option<TxKind>,
    depth: usize,
) -> TxResult<TxRecord> {
    if depth >= MAX_TX_DEPTH {
        return Err(TxError::NestingTooDeep(MAX_TX_DEPTH));
    }
    let decoded = rlp::decode(bytes)?;
    let elements = decoded.as_list()?;
    if elements.len() < 2 {
        return Err(RlpError::Decode("transaction envelope needs tag and version").into());
    }

    let tag = elements[0].as_uint()?;
    let kind = u64::try_from(tag)
        .ok()
        .and_then(TxKind::from_tag)
        .ok_or(TxError::UnknownTag(tag))?;
    if let Some(expected) = expected {
        if expected != kind {
            return Err(TxError::KindMismatch { expected, actual: kind });
        }
    }
    let version = u8::try_from(elements[1].as_uint()?).map_err(|_| TxError::InvalidParam {
        field: "version",
        reason: "version exceeds 8 bits".to_string(),
    })?;
    let schema = resolve_schema(kind, Some(version))?;
    tracing::debug!(kind = ?kind, version, "unpacking transaction");

    let body = &elements[2..];
    if body.len() != schema.fields.len() {
        return Err(TxError::Arity {
            kind,
            version,
            expected: schema.fields.len(),
            actual: body.len(),
        });
    }

    let mut fields = Vec::with_capacity(schema.fields.len());
    for (spec, item) in schema.fields.iter().zip(body) {
        fields.push((spec.name, field::deserialize(spec.name, spec.ty, item, depth)?));
    }
    Ok(TxRecord::from_ordered(kind, version, fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Ttl;
    use chainwire_id::{Id, IdKind};

    fn account(fill: u8) -> Id {
        Id::new(IdKind::Account, [fill; 32])
    }

    fn fields(pairs: Vec<(&str, FieldValue)>) -> HashMap<String, FieldValue> {
        pairs.into_iter().map(|(n, v)| (n.to_string(), v)).collect()
    }

    fn spend_fields() -> HashMap<String, FieldValue> {
        fields(vec![
            ("sender_id", FieldValue::Id(account(0xAA))),
            ("recipient_id", FieldValue::Id(account(0xBB))),
            ("amount", FieldValue::UInt(1000)),
            ("fee", FieldValue::UInt(16_660)),
            ("ttl", FieldValue::UInt(0)),
            ("nonce", FieldValue::UInt(1)),
            ("payload", FieldValue::Binary(b"hello".to_vec())),
        ])
    }

    #[test]
    fn spend_roundtrip() {
        let params = spend_fields();
        let bytes = build(TxKind::SpendTx, None, &params).unwrap();
        let record = unpack(&bytes, None).unwrap();

        assert_eq!(record.kind(), TxKind::SpendTx);
        assert_eq!(record.version(), 1);
        for (name, value) in &params {
            assert_eq!(record.get(name), Some(value), "field {name}");
        }
    }

    #[test]
    fn envelope_starts_with_tag_and_version() {
        let bytes = build(TxKind::SpendTx, None, &spend_fields()).unwrap();
        let decoded = rlp::decode(&bytes).unwrap();
        let elements = decoded.as_list().unwrap();
        assert_eq!(elements[0].as_uint().unwrap(), 12);
        assert_eq!(elements[1].as_uint().unwrap(), 1);
        assert_eq!(elements.len(), 9);
    }

    #[test]
    fn rebuild_from_unpacked_is_identical() {
        let bytes = build(TxKind::SpendTx, None, &spend_fields()).unwrap();
        let record = unpack(&bytes, None).unwrap();
        assert_eq!(record.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn expected_kind_accepted_and_rejected() {
        let bytes = build(TxKind::SpendTx, None, &spend_fields()).unwrap();
        assert!(unpack(&bytes, Some(TxKind::SpendTx)).is_ok());
        let err = unpack(&bytes, Some(TxKind::NameClaimTx)).unwrap_err();
        assert_eq!(
            err,
            TxError::KindMismatch {
                expected: TxKind::NameClaimTx,
                actual: TxKind::SpendTx
            }
        );
    }

    #[test]
    fn default_version_is_claimed_current() {
        let claim = fields(vec![
            ("account_id", FieldValue::Id(account(1))),
            ("nonce", FieldValue::UInt(1)),
            ("name", FieldValue::Binary(b"example.chain".to_vec())),
            ("name_salt", FieldValue::UInt(987)),
            ("name_fee", FieldValue::UInt(500)),
            ("fee", FieldValue::UInt(10)),
            ("ttl", FieldValue::UInt(0)),
        ]);
        let bytes = build(TxKind::NameClaimTx, None, &claim).unwrap();
        let record = unpack(&bytes, None).unwrap();
        assert_eq!(record.version(), 2);
        assert_eq!(record.get("name_fee"), Some(&FieldValue::UInt(500)));
    }

    #[test]
    fn old_version_still_decodes() {
        let claim_v1 = fields(vec![
            ("account_id", FieldValue::Id(account(1))),
            ("nonce", FieldValue::UInt(1)),
            ("name", FieldValue::Binary(b"example.chain".to_vec())),
            ("name_salt", FieldValue::UInt(987)),
            ("fee", FieldValue::UInt(10)),
            ("ttl", FieldValue::UInt(0)),
        ]);
        let bytes = build(TxKind::NameClaimTx, Some(1), &claim_v1).unwrap();
        let record = unpack(&bytes, None).unwrap();
        assert_eq!(record.version(), 1);
        assert_eq!(record.get("name_fee"), None);
    }

    #[test]
    fn oracle_register_with_ttl_field() {
        let params = fields(vec![
            ("account_id", FieldValue::Id(account(3))),
            ("nonce", FieldValue::UInt(4)),
            ("query_format", FieldValue::Binary(b"string".to_vec())),
            ("response_format", FieldValue::Binary(b"int".to_vec())),
            ("query_fee", FieldValue::UInt(30)),
            ("oracle_ttl", FieldValue::Ttl(Ttl::Relative(500))),
            ("fee", FieldValue::UInt(10)),
            ("ttl", FieldValue::UInt(0)),
        ]);
        let bytes = build(TxKind::OracleRegisterTx, None, &params).unwrap();
        let record = unpack(&bytes, Some(TxKind::OracleRegisterTx)).unwrap();
        assert_eq!(record.get("oracle_ttl"), Some(&FieldValue::Ttl(Ttl::Relative(500))));
    }

    #[test]
    fn signed_tx_nests_inner_transaction() {
        let inner =
            TxRecord::from_fields(TxKind::SpendTx, None, &spend_fields()).unwrap();
        let signed = fields(vec![
            ("signatures", FieldValue::BinaryList(vec![vec![0x51; 64]])),
            ("transaction", FieldValue::Tx(Box::new(inner.clone()))),
        ]);
        let bytes = build(TxKind::SignedTx, None, &signed).unwrap();
        let record = unpack(&bytes, Some(TxKind::SignedTx)).unwrap();

        match record.get("transaction").unwrap() {
            FieldValue::Tx(decoded) => assert_eq!(**decoded, inner),
            other => panic!("unexpected field value: {other:?}"),
        }
    }

    #[test]
    fn ga_meta_nests_signed_spend() {
        let spend = TxRecord::from_fields(TxKind::SpendTx, None, &spend_fields()).unwrap();
        let signed = TxRecord::from_fields(
            TxKind::SignedTx,
            None,
            &fields(vec![
                ("signatures", FieldValue::BinaryList(vec![])),
                ("transaction", FieldValue::Tx(Box::new(spend))),
            ]),
        )
        .unwrap();
        let meta = fields(vec![
            ("ga_id", FieldValue::Id(account(8))),
            ("auth_data", FieldValue::Binary(vec![0xCA, 0xFE])),
            ("abi_version", FieldValue::UInt(3)),
            ("fee", FieldValue::UInt(100)),
            ("gas", FieldValue::UInt(5000)),
            ("gas_price", FieldValue::UInt(1)),
            ("tx", FieldValue::Tx(Box::new(signed))),
        ]);

        let bytes = build(TxKind::GaMetaTx, None, &meta).unwrap();
        let record = unpack(&bytes, None).unwrap();
        let signed = match record.get("tx").unwrap() {
            FieldValue::Tx(inner) => inner,
            other => panic!("unexpected field value: {other:?}"),
        };
        assert_eq!(signed.kind(), TxKind::SignedTx);
        match signed.get("transaction").unwrap() {
            FieldValue::Tx(spend) => assert_eq!(spend.kind(), TxKind::SpendTx),
            other => panic!("unexpected field value: {other:?}"),
        }
    }

    #[test]
    fn nesting_depth_capped_on_build() {
        let spend = TxRecord::from_fields(TxKind::SpendTx, None, &spend_fields()).unwrap();
        let mut tx = spend;
        for _ in 0..MAX_TX_DEPTH {
            tx = TxRecord::from_fields(
                TxKind::PayingForTx,
                None,
                &fields(vec![
                    ("payer_id", FieldValue::Id(account(1))),
                    ("nonce", FieldValue::UInt(1)),
                    ("fee", FieldValue::UInt(1)),
                    ("tx", FieldValue::Tx(Box::new(tx))),
                ]),
            )
            .unwrap();
        }
        assert_eq!(tx.to_bytes().unwrap_err(), TxError::NestingTooDeep(MAX_TX_DEPTH));
    }

    #[test]
    fn unknown_tag_rejected() {
        let bytes = rlp::encode(&RlpItem::list(vec![RlpItem::uint(99), RlpItem::uint(1)]));
        assert_eq!(unpack(&bytes, None).unwrap_err(), TxError::UnknownTag(99));
    }

    #[test]
    fn unregistered_version_rejected_on_unpack() {
        let bytes = rlp::encode(&RlpItem::list(vec![RlpItem::uint(12), RlpItem::uint(9)]));
        assert_eq!(
            unpack(&bytes, None).unwrap_err(),
            TxError::SchemaNotFound {
                kind: TxKind::SpendTx,
                version: 9
            }
        );
    }

    #[test]
    fn arity_mismatch_rejected() {
        // spend envelope with a single field instead of seven
        let bytes = rlp::encode(&RlpItem::list(vec![
            RlpItem::uint(12),
            RlpItem::uint(1),
            RlpItem::uint(1000),
        ]));
        let err = unpack(&bytes, None).unwrap_err();
        assert_eq!(
            err,
            TxError::Arity {
                kind: TxKind::SpendTx,
                version: 1,
                expected: 7,
                actual: 1
            }
        );
    }

    #[test]
    fn truncated_envelope_rejected() {
        let bytes = rlp::encode(&RlpItem::list(vec![RlpItem::uint(12)]));
        assert!(matches!(unpack(&bytes, None).unwrap_err(), TxError::Rlp(_)));
    }

    #[test]
    fn non_list_input_rejected() {
        let bytes = rlp::encode(&RlpItem::bytes(b"not a transaction".to_vec()));
        assert!(matches!(unpack(&bytes, None).unwrap_err(), TxError::Rlp(_)));
    }

    #[test]
    fn wrong_recipient_kind_rejected_on_build() {
        let mut params = spend_fields();
        params.insert(
            "sender_id".into(),
            FieldValue::Id(Id::new(IdKind::Channel, [9; 32])),
        );
        let err = build(TxKind::SpendTx, None, &params).unwrap_err();
        assert!(matches!(err, TxError::InvalidParam { field: "sender_id", .. }));
    }
}
