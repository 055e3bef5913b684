use crate::item::RlpItem;

/// Encodes an [`RlpItem`] tree into its canonical RLP byte form.
pub fn encode(item: &RlpItem) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(item, &mut out);
    out
}

/// Appends the encoding of `item` to `out`.
pub fn encode_into(item: &RlpItem, out: &mut Vec<u8>) {
    match item {
        RlpItem::Bytes(bytes) => {
            if bytes.len() == 1 && bytes[0] < 0x80 {
                // A single byte below 0x80 is its own encoding.
                out.push(bytes[0]);
            } else {
                write_length(bytes.len(), 0x80, out);
                out.extend_from_slice(bytes);
            }
        }
        RlpItem::List(items) => {
            let mut payload = Vec::new();
            for child in items {
                encode_into(child, &mut payload);
            }
            write_length(payload.len(), 0xc0, out);
            out.extend_from_slice(&payload);
        }
    }
}

/// Writes a short-form (`offset + len`) or long-form
/// (`offset + 55 + len_of_len || len`) length prefix.
fn write_length(len: usize, offset: u8, out: &mut Vec<u8>) {
    if len <= 55 {
        out.push(offset + len as u8);
    } else {
        let be = len.to_be_bytes();
        let start = be.iter().position(|&b| b != 0).unwrap_or(be.len() - 1);
        let len_bytes = &be[start..];
        out.push(offset + 55 + len_bytes.len() as u8);
        out.extend_from_slice(len_bytes);
    }
}
