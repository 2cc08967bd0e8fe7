use crate::error::{MptError, MptResult};

/// Half-byte path for trie traversal.
///
/// Keys are split into nibbles (0–15) before descent; a 32-byte key becomes
/// 64 nibbles. The compact (hex-prefix) form packs a nibble path back into
/// bytes with a flag nibble carrying leaf/extension and odd/even parity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nibbles(Vec<u8>);

const FLAG_EXTENSION_EVEN: u8 = 0;
const FLAG_EXTENSION_ODD: u8 = 1;
const FLAG_LEAF_EVEN: u8 = 2;
const FLAG_LEAF_ODD: u8 = 3;

impl Nibbles {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut nibbles = Vec::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            nibbles.push(byte >> 4);
            nibbles.push(byte & 0x0F);
        }
        Self(nibbles)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn at(&self, index: usize) -> u8 {
        self.0[index]
    }

    pub fn slice_from(&self, start: usize) -> Self {
        Self(self.0[start..].to_vec())
    }

    pub fn starts_with(&self, prefix: &Nibbles) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Compact (hex-prefix) encoding. The flag nibble is
    /// `2*is_leaf + odd_parity`; odd paths carry their first nibble in the
    /// flag byte.
    pub fn to_compact(&self, is_leaf: bool) -> Vec<u8> {
        let flag = if is_leaf { FLAG_LEAF_EVEN } else { FLAG_EXTENSION_EVEN };
        let mut out = Vec::with_capacity(self.0.len() / 2 + 1);
        let rest = if self.0.len() % 2 == 1 {
            out.push(((flag + 1) << 4) | self.0[0]);
            &self.0[1..]
        } else {
            out.push(flag << 4);
            &self.0[..]
        };
        for pair in rest.chunks(2) {
            out.push((pair[0] << 4) | pair[1]);
        }
        out
    }

    /// Strict compact decoding; returns the path and whether the node is a
    /// leaf. Flag nibbles outside 0–3 and nonzero padding are rejected.
    pub fn from_compact(encoded: &[u8]) -> MptResult<(Self, bool)> {
        let (&first, rest) = encoded
            .split_first()
            .ok_or(MptError::Decode("empty compact path"))?;
        let flag = first >> 4;
        let (is_leaf, odd) = match flag {
            FLAG_EXTENSION_EVEN => (false, false),
            FLAG_EXTENSION_ODD => (false, true),
            FLAG_LEAF_EVEN => (true, false),
            FLAG_LEAF_ODD => (true, true),
            other => return Err(MptError::UnknownPathNibble(other)),
        };

        let mut nibbles = Vec::with_capacity(encoded.len() * 2);
        if odd {
            nibbles.push(first & 0x0F);
        } else if first & 0x0F != 0 {
            return Err(MptError::Decode("nonzero padding in even compact path"));
        }
        for &byte in rest {
            nibbles.push(byte >> 4);
            nibbles.push(byte & 0x0F);
        }
        Ok((Self(nibbles), is_leaf))
    }

    #[cfg(test)]
    pub(crate) fn from_raw(nibbles: Vec<u8>) -> Self {
        Self(nibbles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_expansion() {
        let nibbles = Nibbles::from_bytes(&[0xAB, 0x04]);
        assert_eq!(nibbles.len(), 4);
        assert_eq!(nibbles.at(0), 0x0A);
        assert_eq!(nibbles.at(1), 0x0B);
        assert_eq!(nibbles.at(2), 0x00);
        assert_eq!(nibbles.at(3), 0x04);
    }

    #[test]
    fn compact_roundtrip() {
        for (raw, is_leaf) in [
            (vec![], true),
            (vec![], false),
            (vec![1, 2, 3], true),
            (vec![1, 2, 3, 4], true),
            (vec![0x0F], false),
            (vec![5, 0, 5, 0, 5], false),
        ] {
            let original = Nibbles::from_raw(raw);
            let compact = original.to_compact(is_leaf);
            let (decoded, leaf_flag) = Nibbles::from_compact(&compact).unwrap();
            assert_eq!(decoded, original);
            assert_eq!(leaf_flag, is_leaf);
        }
    }

    #[test]
    fn flag_values() {
        assert_eq!(Nibbles::from_raw(vec![1, 2]).to_compact(false)[0] >> 4, 0);
        assert_eq!(Nibbles::from_raw(vec![1]).to_compact(false)[0] >> 4, 1);
        assert_eq!(Nibbles::from_raw(vec![1, 2]).to_compact(true)[0] >> 4, 2);
        assert_eq!(Nibbles::from_raw(vec![1]).to_compact(true)[0] >> 4, 3);
    }

    #[test]
    fn bad_flag_rejected() {
        let err = Nibbles::from_compact(&[0x40]).unwrap_err();
        assert_eq!(err, MptError::UnknownPathNibble(4));
        let err = Nibbles::from_compact(&[0xF0]).unwrap_err();
        assert_eq!(err, MptError::UnknownPathNibble(15));
    }

    #[test]
    fn nonzero_padding_rejected() {
        // even-parity flag with junk in the low nibble
        let err = Nibbles::from_compact(&[0x21, 0x12]).unwrap_err();
        assert_eq!(err, MptError::Decode("nonzero padding in even compact path"));
    }

    #[test]
    fn empty_input_rejected() {
        assert_eq!(Nibbles::from_compact(&[]), Err(MptError::Decode("empty compact path")));
    }

    #[test]
    fn prefix_checks() {
        let path = Nibbles::from_bytes(&[0xA1, 0xB2]);
        assert!(path.starts_with(&Nibbles::from_raw(vec![0x0A, 0x01])));
        assert!(!path.starts_with(&Nibbles::from_raw(vec![0x0B])));
        assert_eq!(path.slice_from(2), Nibbles::from_raw(vec![0x0B, 0x02]));
    }
}
