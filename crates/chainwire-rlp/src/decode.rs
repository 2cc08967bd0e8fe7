use crate::error::{RlpError, RlpResult};
use crate::item::RlpItem;

/// Decode a complete canonical encoding into an item.
///
/// Strict: trailing bytes, truncated payloads, and non-minimal headers are
/// all rejected. For every accepted input, `encode(decode(input)) == input`.
pub fn decode(input: &[u8]) -> RlpResult<RlpItem> {
    let (item, rest) = decode_item(input)?;
    if !rest.is_empty() {
        return Err(RlpError::Trailing(rest.len()));
    }
    Ok(item)
}

fn decode_item(input: &[u8]) -> RlpResult<(RlpItem, &[u8])> {
    let &tag = input.first().ok_or(RlpError::Decode("empty input"))?;
    match tag {
        0x00..=0x7F => Ok((RlpItem::Bytes(vec![tag]), &input[1..])),
        0x80..=0xB7 => {
            let len = (tag - 0x80) as usize;
            let (payload, rest) = split_payload(&input[1..], len)?;
            if len == 1 && payload[0] < 0x80 {
                return Err(RlpError::Decode("single byte below 0x80 must encode itself"));
            }
            Ok((RlpItem::Bytes(payload.to_vec()), rest))
        }
        0xB8..=0xBF => {
            let (len, after_len) = read_long_length(&input[1..], (tag - 0xB7) as usize)?;
            if len < 56 {
                return Err(RlpError::Decode("long string form used for short payload"));
            }
            let (payload, rest) = split_payload(after_len, len)?;
            Ok((RlpItem::Bytes(payload.to_vec()), rest))
        }
        0xC0..=0xF7 => {
            let len = (tag - 0xC0) as usize;
            let (payload, rest) = split_payload(&input[1..], len)?;
            Ok((decode_list(payload)?, rest))
        }
        0xF8..=0xFF => {
            let (len, after_len) = read_long_length(&input[1..], (tag - 0xF7) as usize)?;
            if len < 56 {
                return Err(RlpError::Decode("long list form used for short payload"));
            }
            let (payload, rest) = split_payload(after_len, len)?;
            Ok((decode_list(payload)?, rest))
        }
    }
}

/// Decode concatenated element encodings until the payload is exhausted.
fn decode_list(mut payload: &[u8]) -> RlpResult<RlpItem> {
    let mut items = Vec::new();
    while !payload.is_empty() {
        let (item, rest) = decode_item(payload)?;
        items.push(item);
        payload = rest;
    }
    Ok(RlpItem::List(items))
}

fn split_payload(input: &[u8], len: usize) -> RlpResult<(&[u8], &[u8])> {
    if input.len() < len {
        return Err(RlpError::PayloadLength {
            declared: len,
            available: input.len(),
        });
    }
    Ok(input.split_at(len))
}

/// Read a big-endian payload length of `width` bytes. Leading zeros make
/// the header non-minimal.
fn read_long_length(input: &[u8], width: usize) -> RlpResult<(usize, &[u8])> {
    if width > std::mem::size_of::<usize>() {
        return Err(RlpError::Decode("length of length exceeds platform width"));
    }
    let (len_bytes, rest) = split_payload(input, width)?;
    if len_bytes.first() == Some(&0) {
        return Err(RlpError::Decode("leading zero byte in payload length"));
    }
    let len = len_bytes.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize);
    Ok((len, rest))
}
