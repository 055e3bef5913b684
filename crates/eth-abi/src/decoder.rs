use alloy_primitives::{I256, U256};

use crate::encoder::{int_fits, uint_fits};
use crate::error::AbiError;
use crate::item::{Constructor, CustomError, Function};
use crate::param::ParamType;
use crate::value::AbiValue;

/// Decoder configuration.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Budget of bytes the decoder may consume before failing with
    /// `BufferOverrun`. Guards against inputs whose declared nested-dynamic
    /// expansion dwarfs the actual payload.
    pub max_bytes: u16,
    /// Accept trailing bytes beyond the consumed region instead of failing
    /// with `JunkData`.
    pub allow_junk_data: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_bytes: 1024,
            allow_junk_data: false,
        }
    }
}

/// A decoded function / error / constructor payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCall {
    /// `0x`-prefixed hex of the 4-byte selector (empty for constructors).
    pub selector: String,
    pub values: Vec<AbiValue>,
}

/// Decodes an ABI-encoded parameter list. The buffer must be a multiple of
/// 32 bytes long; the optional 4-byte selector is stripped by the caller
/// (see [`decode_function`]).
pub fn decode_parameters(
    types: &[ParamType],
    data: &[u8],
    options: DecodeOptions,
) -> Result<Vec<AbiValue>, AbiError> {
    tracing::trace!(
        types = types.len(),
        bytes = data.len(),
        "decoding ABI parameters"
    );

    if data.len() % 32 != 0 {
        return Err(AbiError::InvalidDecodeDataSize(format!(
            "buffer of {} bytes is not word-aligned",
            data.len()
        )));
    }

    let mut cursor = Cursor::new(data, options);
    let mut values = Vec::with_capacity(types.len());
    let mut position = 0;
    for ty in types {
        let (value, next) = decode_value(&mut cursor, ty, 0, position)?;
        values.push(value);
        position = next;
    }

    if !options.allow_junk_data && cursor.furthest < data.len() {
        return Err(AbiError::JunkData(data.len() - cursor.furthest));
    }
    Ok(values)
}

/// Decodes a function-call payload, verifying the leading selector against
/// the item's canonical signature.
pub fn decode_function(
    function: &Function,
    data: &[u8],
    options: DecodeOptions,
) -> Result<DecodedCall, AbiError> {
    let kinds: Vec<ParamType> = function.inputs.iter().map(|p| p.kind.clone()).collect();
    decode_selector_payload(function.selector(), &kinds, data, options)
}

/// Decodes a custom-error payload, verifying the leading selector.
pub fn decode_error(
    error: &CustomError,
    data: &[u8],
    options: DecodeOptions,
) -> Result<DecodedCall, AbiError> {
    let kinds: Vec<ParamType> = error.inputs.iter().map(|p| p.kind.clone()).collect();
    decode_selector_payload(error.selector(), &kinds, data, options)
}

/// Decodes constructor arguments. Constructors carry no selector.
pub fn decode_constructor(
    constructor: &Constructor,
    data: &[u8],
    options: DecodeOptions,
) -> Result<DecodedCall, AbiError> {
    let kinds: Vec<ParamType> = constructor.inputs.iter().map(|p| p.kind.clone()).collect();
    let values = decode_parameters(&kinds, data, options)?;
    Ok(DecodedCall {
        selector: String::new(),
        values,
    })
}

fn decode_selector_payload(
    expected: [u8; 4],
    kinds: &[ParamType],
    data: &[u8],
    options: DecodeOptions,
) -> Result<DecodedCall, AbiError> {
    if data.len() < 4 {
        return Err(AbiError::InvalidDecodeDataSize(format!(
            "{} bytes is too short for a selector",
            data.len()
        )));
    }
    let got = &data[..4];
    if got != expected.as_slice() {
        return Err(AbiError::InvalidAbiSignature {
            expected: format!("0x{}", hex::encode(expected)),
            got: format!("0x{}", hex::encode(got)),
        });
    }
    let values = decode_parameters(kinds, &data[4..], options)?;
    Ok(DecodedCall {
        selector: format!("0x{}", hex::encode(got)),
        values,
    })
}

/// Byte-accounting read cursor over the full input buffer.
struct Cursor<'a> {
    data: &'a [u8],
    read: u32,
    max: u32,
    /// High-water mark of consumed bytes, for the junk-data check.
    furthest: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            data,
            read: 0,
            max: u32::from(options.max_bytes),
            furthest: 0,
        }
    }

    fn charge(&mut self, amount: usize) -> Result<(), AbiError> {
        self.read = self
            .read
            .saturating_add(u32::try_from(amount).unwrap_or(u32::MAX));
        if self.read > self.max {
            tracing::debug!(read = self.read, max = self.max, "decode byte budget exceeded");
            return Err(AbiError::BufferOverrun {
                read: self.read,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Reads the 32-byte word at `offset` into the buffer.
    fn word(&mut self, offset: usize) -> Result<[u8; 32], AbiError> {
        self.charge(32)?;
        let end = offset.checked_add(32).ok_or_else(|| {
            AbiError::InvalidDecodeDataSize("word offset overflows".into())
        })?;
        let slice = self.data.get(offset..end).ok_or_else(|| {
            AbiError::InvalidDecodeDataSize(format!(
                "word at {offset} escapes {}-byte buffer",
                self.data.len()
            ))
        })?;
        self.furthest = self.furthest.max(end);
        let mut word = [0u8; 32];
        word.copy_from_slice(slice);
        Ok(word)
    }

    /// Reads `len` payload bytes at `offset`. The trailing padding up to the
    /// word boundary counts as consumed (when present) but is not charged.
    fn payload(&mut self, offset: usize, len: usize) -> Result<&'a [u8], AbiError> {
        self.charge(len)?;
        let end = offset.checked_add(len).ok_or_else(|| {
            AbiError::InvalidDecodeDataSize("payload length overflows".into())
        })?;
        let slice = self.data.get(offset..end).ok_or_else(|| {
            AbiError::InvalidDecodeDataSize(format!(
                "payload of {len} bytes at {offset} escapes {}-byte buffer",
                self.data.len()
            ))
        })?;
        let padded_end = end
            .checked_add(31)
            .map(|e| (e / 32) * 32)
            .unwrap_or(end)
            .min(self.data.len());
        self.furthest = self.furthest.max(padded_end);
        Ok(slice)
    }

    /// Reads a word and interprets it as an in-buffer offset or length.
    fn index_word(&mut self, offset: usize, what: &str) -> Result<usize, AbiError> {
        let word = self.word(offset)?;
        let value = U256::from_be_bytes(word);
        usize::try_from(value).map_err(|_| {
            AbiError::InvalidDecodeDataSize(format!("{what} does not fit the address space"))
        })
    }
}

/// Decodes the value of `ty` whose head slot sits at `region + position`.
/// Returns the value and the next head position.
fn decode_value(
    cursor: &mut Cursor<'_>,
    ty: &ParamType,
    region: usize,
    position: usize,
) -> Result<(AbiValue, usize), AbiError> {
    if ty.is_dynamic() {
        // Head slot carries an offset relative to the enclosing region.
        let offset = cursor.index_word(region + position, "offset")?;
        let body = region
            .checked_add(offset)
            .filter(|&b| b <= cursor.data.len())
            .ok_or_else(|| {
                AbiError::InvalidDecodeDataSize(format!(
                    "offset {offset} escapes the buffer"
                ))
            })?;
        let value = decode_dynamic_body(cursor, ty, body)?;
        return Ok((value, position + 32));
    }

    match ty {
        ParamType::Bool => {
            let word = cursor.word(region + position)?;
            let value = U256::from_be_bytes(word);
            if value > U256::from(1u64) {
                return Err(AbiError::ValueOutOfRange(
                    "bool word is neither 0 nor 1".into(),
                ));
            }
            Ok((AbiValue::Bool(value == U256::from(1u64)), position + 32))
        }

        ParamType::Uint(bits) => {
            let word = cursor.word(region + position)?;
            let value = U256::from_be_bytes(word);
            if !uint_fits(value, *bits) {
                return Err(AbiError::ValueOutOfRange(format!(
                    "word does not fit uint{bits}"
                )));
            }
            Ok((AbiValue::Uint(value), position + 32))
        }

        ParamType::Int(bits) => {
            let word = cursor.word(region + position)?;
            let raw = U256::from_be_bytes(word);
            if !int_fits(raw, *bits) {
                return Err(AbiError::ValueOutOfRange(format!(
                    "word is not a sign-extended int{bits}"
                )));
            }
            Ok((AbiValue::Int(I256::from_raw(raw)), position + 32))
        }

        ParamType::Address => {
            let word = cursor.word(region + position)?;
            if word[..12].iter().any(|&b| b != 0) {
                return Err(AbiError::ValueOutOfRange(
                    "address word has nonzero padding".into(),
                ));
            }
            let mut addr = [0u8; 20];
            addr.copy_from_slice(&word[12..]);
            Ok((AbiValue::Address(addr), position + 32))
        }

        ParamType::FixedBytes(size) => {
            let word = cursor.word(region + position)?;
            if word[*size..].iter().any(|&b| b != 0) {
                return Err(AbiError::ValueOutOfRange(format!(
                    "bytes{size} word has nonzero padding"
                )));
            }
            Ok((AbiValue::FixedBytes(word[..*size].to_vec()), position + 32))
        }

        ParamType::FixedArray(element, size) => {
            let mut items = Vec::new();
            let mut inner = position;
            for _ in 0..*size {
                let (item, next) = decode_value(cursor, element, region, inner)?;
                items.push(item);
                inner = next;
            }
            Ok((AbiValue::FixedArray(items), inner))
        }

        ParamType::Tuple(components) => {
            let mut fields = Vec::new();
            let mut inner = position;
            for component in components {
                let (field, next) = decode_value(cursor, component, region, inner)?;
                fields.push(field);
                inner = next;
            }
            Ok((AbiValue::Tuple(fields), inner))
        }

        // Dynamic variants are handled above.
        ParamType::String | ParamType::Bytes | ParamType::Array(_) => unreachable!(),
    }
}

/// Decodes the tail body of a dynamic value rooted at absolute offset
/// `body`, which becomes the enclosing region for nested offsets.
fn decode_dynamic_body(
    cursor: &mut Cursor<'_>,
    ty: &ParamType,
    body: usize,
) -> Result<AbiValue, AbiError> {
    match ty {
        ParamType::String => {
            let len = cursor.index_word(body, "string length")?;
            let payload = cursor.payload(body + 32, len)?;
            let text = std::str::from_utf8(payload).map_err(|_| {
                AbiError::InvalidParamType("string payload is not valid UTF-8".into())
            })?;
            Ok(AbiValue::String(text.to_owned()))
        }

        ParamType::Bytes => {
            let len = cursor.index_word(body, "bytes length")?;
            let payload = cursor.payload(body + 32, len)?;
            Ok(AbiValue::Bytes(payload.to_vec()))
        }

        ParamType::Array(element) => {
            let len = cursor.index_word(body, "array length")?;
            // Elements form a fresh head region after the length word. The
            // element count is attacker-controlled: grow the result as
            // elements actually decode instead of trusting `len`.
            let region = body + 32;
            let mut items = Vec::new();
            let mut position = 0;
            for _ in 0..len {
                let (item, next) = decode_value(cursor, element, region, position)?;
                items.push(item);
                position = next;
            }
            Ok(AbiValue::Array(items))
        }

        ParamType::FixedArray(element, size) => {
            let mut items = Vec::new();
            let mut position = 0;
            for _ in 0..*size {
                let (item, next) = decode_value(cursor, element, body, position)?;
                items.push(item);
                position = next;
            }
            Ok(AbiValue::FixedArray(items))
        }

        ParamType::Tuple(components) => {
            let mut fields = Vec::new();
            let mut position = 0;
            for component in components {
                let (field, next) = decode_value(cursor, component, body, position)?;
                fields.push(field);
                position = next;
            }
            Ok(AbiValue::Tuple(fields))
        }

        _ => unreachable!("static types never reach the tail decoder"),
    }
}
