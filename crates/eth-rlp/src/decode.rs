use crate::error::RlpError;
use crate::item::RlpItem;

/// Decodes a complete RLP buffer into an [`RlpItem`] tree.
///
/// The decoder is strict: it rejects non-minimal length encodings
/// (a single byte below 0x80 wrapped in `0x81`, long-form lengths that fit
/// the short form, length fields with leading zeros), truncated payloads,
/// and any bytes after the top-level item.
pub fn decode(data: &[u8]) -> Result<RlpItem, RlpError> {
    let (item, consumed) = decode_item(data)?;
    if consumed != data.len() {
        return Err(RlpError::TrailingData);
    }
    Ok(item)
}

/// Decodes one item from the front of `data`, returning it together with the
/// number of bytes consumed.
fn decode_item(data: &[u8]) -> Result<(RlpItem, usize), RlpError> {
    let &prefix = data.first().ok_or(RlpError::UnexpectedEnd)?;

    match prefix {
        // Single byte, encodes itself.
        0x00..=0x7f => Ok((RlpItem::Bytes(vec![prefix]), 1)),

        // Short string: 0-55 payload bytes.
        0x80..=0xb7 => {
            let len = (prefix - 0x80) as usize;
            let payload = slice_payload(data, 1, len)?;
            if len == 1 && payload[0] < 0x80 {
                return Err(RlpError::NonMinimalLength);
            }
            Ok((RlpItem::Bytes(payload.to_vec()), 1 + len))
        }

        // Long string: length-of-length form.
        0xb8..=0xbf => {
            let (len, header) = read_long_length(data, prefix - 0xb7)?;
            let payload = slice_payload(data, header, len)?;
            Ok((RlpItem::Bytes(payload.to_vec()), header + len))
        }

        // Short list: 0-55 payload bytes.
        0xc0..=0xf7 => {
            let len = (prefix - 0xc0) as usize;
            let payload = slice_payload(data, 1, len)?;
            Ok((RlpItem::List(decode_children(payload)?), 1 + len))
        }

        // Long list.
        0xf8..=0xff => {
            let (len, header) = read_long_length(data, prefix - 0xf7)?;
            let payload = slice_payload(data, header, len)?;
            Ok((RlpItem::List(decode_children(payload)?), header + len))
        }
    }
}

/// Decodes consecutive items until `payload` is exhausted.
fn decode_children(payload: &[u8]) -> Result<Vec<RlpItem>, RlpError> {
    let mut items = Vec::new();
    let mut rest = payload;
    while !rest.is_empty() {
        let (item, consumed) = decode_item(rest)?;
        items.push(item);
        rest = &rest[consumed..];
    }
    Ok(items)
}

/// Reads a long-form length: `len_of_len` big-endian bytes after the prefix.
/// Returns the payload length and the total header size (prefix + length
/// bytes).
fn read_long_length(data: &[u8], len_of_len: u8) -> Result<(usize, usize), RlpError> {
    let len_of_len = len_of_len as usize;
    let len_bytes = slice_payload(data, 1, len_of_len)?;

    if len_bytes[0] == 0 {
        return Err(RlpError::NonMinimalLength);
    }
    if len_of_len > std::mem::size_of::<usize>() {
        return Err(RlpError::LengthOverflow);
    }

    let mut len = 0usize;
    for &b in len_bytes {
        len = len
            .checked_mul(256)
            .and_then(|l| l.checked_add(b as usize))
            .ok_or(RlpError::LengthOverflow)?;
    }

    if len <= 55 {
        return Err(RlpError::NonMinimalLength);
    }
    Ok((len, 1 + len_of_len))
}

fn slice_payload(data: &[u8], start: usize, len: usize) -> Result<&[u8], RlpError> {
    let end = start.checked_add(len).ok_or(RlpError::LengthOverflow)?;
    data.get(start..end).ok_or(RlpError::UnexpectedEnd)
}
