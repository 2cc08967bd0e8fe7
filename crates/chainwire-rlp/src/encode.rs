use crate::item::RlpItem;

const SHORT_STRING: u8 = 0x80;
const SHORT_LIST: u8 = 0xC0;

/// Encode an item into its canonical byte representation.
pub fn encode(item: &RlpItem) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(item, &mut out);
    out
}

fn encode_into(item: &RlpItem, out: &mut Vec<u8>) {
    match item {
        RlpItem::Bytes(data) => {
            // A single byte below 0x80 is its own encoding.
            if data.len() == 1 && data[0] < SHORT_STRING {
                out.push(data[0]);
                return;
            }
            write_header(SHORT_STRING, data.len(), out);
            out.extend_from_slice(data);
        }
        RlpItem::List(items) => {
            let mut payload = Vec::new();
            for item in items {
                encode_into(item, &mut payload);
            }
            write_header(SHORT_LIST, payload.len(), out);
            out.extend_from_slice(&payload);
        }
    }
}

/// Length header: short form packs the length into the tag byte, long form
/// (>= 56 bytes) writes the tag plus a minimal big-endian length.
fn write_header(offset: u8, len: usize, out: &mut Vec<u8>) {
    if len < 56 {
        out.push(offset + len as u8);
    } else {
        let be = len.to_be_bytes();
        let start = be.iter().position(|&b| b != 0).unwrap_or(be.len() - 1);
        let len_bytes = &be[start..];
        out.push(offset + 55 + len_bytes.len() as u8);
        out.extend_from_slice(len_bytes);
    }
}
