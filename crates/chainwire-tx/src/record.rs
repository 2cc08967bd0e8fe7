use std::collections::HashMap;

use crate::codec;
use crate::error::{TxError, TxResult};
use crate::field::FieldValue;
use crate::kind::TxKind;
use crate::schema::resolve_schema;

/// A named-field transaction record, pinned to one (kind, version) layout.
///
/// Produced either by a caller assembling parameters for [`codec::build`]
/// or by [`codec::unpack`] reading bytes off the wire. Fields are kept in
/// schema order; equality is field-for-field, recursing through embedded
/// transactions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxRecord {
    kind: TxKind,
    version: u8,
    fields: Vec<(&'static str, FieldValue)>,
}

impl TxRecord {
    /// Assemble a record from a name→value map, validating presence
    /// against the schema for (kind, version).
    ///
    /// Entries not named by the schema are ignored. Constraint checks
    /// beyond presence happen at encode time.
    pub fn from_fields(
        kind: TxKind,
        version: Option<u8>,
        fields: &HashMap<String, FieldValue>,
    ) -> TxResult<Self> {
        let schema = resolve_schema(kind, version)?;
        let mut ordered = Vec::with_capacity(schema.fields.len());
        for spec in schema.fields {
            let value = fields
                .get(spec.name)
                .cloned()
                .ok_or(TxError::MissingParam(spec.name))?;
            ordered.push((spec.name, value));
        }
        Ok(Self {
            kind,
            version: schema.version,
            fields: ordered,
        })
    }

    pub(crate) fn from_ordered(
        kind: TxKind,
        version: u8,
        fields: Vec<(&'static str, FieldValue)>,
    ) -> Self {
        Self { kind, version, fields }
    }

    pub fn kind(&self) -> TxKind {
        self.kind
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Field value by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Fields in schema (wire) order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (*n, v))
    }

    /// Encode this record; equivalent to [`codec::build`] with the
    /// record's own kind and version.
    pub fn to_bytes(&self) -> TxResult<Vec<u8>> {
        codec::build_record_at_depth(self, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainwire_id::{Id, IdKind};

    fn spend_fields() -> HashMap<String, FieldValue> {
        let mut fields = HashMap::new();
        fields.insert("sender_id".into(), FieldValue::Id(Id::new(IdKind::Account, [1; 32])));
        fields.insert("recipient_id".into(), FieldValue::Id(Id::new(IdKind::Account, [2; 32])));
        fields.insert("amount".into(), FieldValue::UInt(1000));
        fields.insert("fee".into(), FieldValue::UInt(20));
        fields.insert("ttl".into(), FieldValue::UInt(0));
        fields.insert("nonce".into(), FieldValue::UInt(7));
        fields.insert("payload".into(), FieldValue::Binary(vec![]));
        fields
    }

    #[test]
    fn from_fields_orders_by_schema() {
        let record = TxRecord::from_fields(TxKind::SpendTx, None, &spend_fields()).unwrap();
        let names: Vec<&str> = record.fields().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            ["sender_id", "recipient_id", "amount", "fee", "ttl", "nonce", "payload"]
        );
        assert_eq!(record.version(), 1);
    }

    #[test]
    fn missing_field_named_in_error() {
        let mut fields = spend_fields();
        fields.remove("nonce");
        let err = TxRecord::from_fields(TxKind::SpendTx, None, &fields).unwrap_err();
        assert_eq!(err, TxError::MissingParam("nonce"));
    }

    #[test]
    fn extra_fields_ignored() {
        let mut fields = spend_fields();
        fields.insert("unrelated".into(), FieldValue::UInt(1));
        assert!(TxRecord::from_fields(TxKind::SpendTx, None, &fields).is_ok());
    }

    #[test]
    fn get_by_name() {
        let record = TxRecord::from_fields(TxKind::SpendTx, None, &spend_fields()).unwrap();
        assert_eq!(record.get("amount"), Some(&FieldValue::UInt(1000)));
        assert_eq!(record.get("no_such_field"), None);
    }
}
