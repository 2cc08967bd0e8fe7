use sha2::{Digest, Sha256};

use crate::error::{IdError, IdResult};
use crate::kind::{HashKind, Prefix};

/// Checksum appended to every textual payload: first 4 bytes of
/// SHA-256(SHA-256(payload)).
pub fn checksum(payload: &[u8]) -> [u8; 4] {
    let inner = Sha256::digest(payload);
    let outer = Sha256::digest(inner);
    let mut out = [0u8; 4];
    out.copy_from_slice(&outer[..4]);
    out
}

/// Render `<prefix>_<base58(payload ‖ checksum)>`.
pub fn encode_check(prefix: &str, payload: &[u8]) -> String {
    let mut data = payload.to_vec();
    data.extend_from_slice(&checksum(payload));
    format!("{}_{}", prefix, bs58::encode(data).into_string())
}

/// Split an address, verify the checksum, and return the registered prefix
/// with the raw payload. Length constraints are the caller's job; this
/// validates structure and integrity only.
pub fn decode_any(input: &str) -> IdResult<(Prefix, Vec<u8>)> {
    let (prefix, body) = input.split_once('_').ok_or(IdError::MissingSeparator)?;
    let prefix = Prefix::lookup(prefix).ok_or_else(|| IdError::PrefixNotFound(prefix.to_string()))?;

    let decoded = bs58::decode(body)
        .into_vec()
        .map_err(|e| IdError::Base58(e.to_string()))?;
    if decoded.len() < 4 {
        return Err(IdError::TooShort);
    }
    let (payload, declared) = decoded.split_at(decoded.len() - 4);
    if checksum(payload) != declared {
        return Err(IdError::InvalidChecksum);
    }
    Ok((prefix, payload.to_vec()))
}

/// Render a hash/blob payload under its registered prefix.
pub fn encode_data(kind: HashKind, data: &[u8]) -> IdResult<String> {
    check_len(kind, data.len())?;
    Ok(encode_check(kind.prefix(), data))
}

/// Decode an address expected to carry the given hash kind.
pub fn decode_data(kind: HashKind, input: &str) -> IdResult<Vec<u8>> {
    match decode_any(input)? {
        (Prefix::Hash(found), payload) if found == kind => {
            check_len(kind, payload.len())?;
            Ok(payload)
        }
        (found, _) => Err(IdError::PrefixNotFound(found.as_str().to_string())),
    }
}

fn check_len(kind: HashKind, actual: usize) -> IdResult<()> {
    match kind.payload_len() {
        Some(expected) if expected != actual => Err(IdError::PayloadLength {
            prefix: kind.prefix(),
            expected,
            actual,
        }),
        _ => Ok(()),
    }
}
