use crate::error::{RlpError, RlpResult};

/// A decoded RLP value: either a byte string or an ordered list of items.
///
/// Lists nest arbitrarily. Zero-length byte strings are distinct from
/// absent values and from empty lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RlpItem {
    Bytes(Vec<u8>),
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// Byte-string item from anything that converts to a byte vector.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(data.into())
    }

    /// List item.
    pub fn list(items: Vec<RlpItem>) -> Self {
        Self::List(items)
    }

    /// Byte-string item holding the minimal big-endian form of `value`.
    ///
    /// Zero encodes as the empty string.
    pub fn uint(value: u128) -> Self {
        Self::Bytes(uint_to_bytes(value))
    }

    /// The byte-string payload, or an error if this is a list.
    pub fn as_bytes(&self) -> RlpResult<&[u8]> {
        match self {
            Self::Bytes(b) => Ok(b),
            Self::List(_) => Err(RlpError::Decode("expected byte string, found list")),
        }
    }

    /// The list elements, or an error if this is a byte string.
    pub fn as_list(&self) -> RlpResult<&[RlpItem]> {
        match self {
            Self::List(items) => Ok(items),
            Self::Bytes(_) => Err(RlpError::Decode("expected list, found byte string")),
        }
    }

    /// Interpret a byte-string item as a minimal big-endian unsigned integer.
    pub fn as_uint(&self) -> RlpResult<u128> {
        bytes_to_uint(self.as_bytes()?)
    }
}

/// Minimal big-endian byte representation of `value`; empty for zero.
pub fn uint_to_bytes(value: u128) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[start..].to_vec()
}

/// Parse a minimal big-endian unsigned integer.
///
/// Rejects leading zero bytes (non-canonical) and inputs wider than 16
/// bytes.
pub fn bytes_to_uint(bytes: &[u8]) -> RlpResult<u128> {
    if bytes.len() > 16 {
        return Err(RlpError::IntTooLarge(bytes.len()));
    }
    if bytes.first() == Some(&0) {
        return Err(RlpError::Decode("leading zero byte in integer"));
    }
    Ok(bytes.iter().fold(0u128, |acc, &b| (acc << 8) | u128::from(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_empty_string() {
        assert_eq!(uint_to_bytes(0), Vec::<u8>::new());
        assert_eq!(bytes_to_uint(&[]).unwrap(), 0);
    }

    #[test]
    fn uint_bytes_are_minimal() {
        assert_eq!(uint_to_bytes(5), vec![5]);
        assert_eq!(uint_to_bytes(256), vec![1, 0]);
        assert_eq!(uint_to_bytes(0xFFFF), vec![0xFF, 0xFF]);
    }

    #[test]
    fn uint_roundtrip() {
        for v in [0u128, 1, 127, 128, 255, 256, 1_000_000, u128::from(u64::MAX), u128::MAX] {
            assert_eq!(bytes_to_uint(&uint_to_bytes(v)).unwrap(), v);
        }
    }

    #[test]
    fn leading_zero_rejected() {
        let err = bytes_to_uint(&[0, 5]).unwrap_err();
        assert!(matches!(err, RlpError::Decode(_)));
    }

    #[test]
    fn oversized_integer_rejected() {
        let err = bytes_to_uint(&[1u8; 17]).unwrap_err();
        assert_eq!(err, RlpError::IntTooLarge(17));
    }

    #[test]
    fn accessor_type_mismatch() {
        let list = RlpItem::list(vec![]);
        assert!(list.as_bytes().is_err());
        let bytes = RlpItem::bytes(vec![1]);
        assert!(bytes.as_list().is_err());
    }
}
