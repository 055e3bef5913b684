use alloy_primitives::U256;

use crate::error::AbiError;
use crate::item::{Constructor, CustomError, Function};
use crate::param::ParamType;
use crate::value::AbiValue;

/// Encodes an ordered parameter list into the standard head/tail ABI layout.
///
/// Static parameters sit inline in the head; dynamic parameters leave a
/// 32-byte offset (relative to the start of the enclosing head) pointing at
/// their body in the tail. The output length is always a multiple of 32 and
/// is a pure function of `(types, values)`.
pub fn encode_parameters(
    types: &[ParamType],
    values: &[AbiValue],
) -> Result<Vec<u8>, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::InvalidLength(format!(
            "{} parameter types for {} values",
            types.len(),
            values.len()
        )));
    }
    let pairs: Vec<(&ParamType, &AbiValue)> = types.iter().zip(values).collect();
    encode_sequence(&pairs)
}

/// Encodes a function call: `selector || encode_parameters(inputs, values)`.
pub fn encode_function_call(
    function: &Function,
    values: &[AbiValue],
) -> Result<Vec<u8>, AbiError> {
    let mut out = function.selector().to_vec();
    out.extend(encode_item_inputs(
        &function.inputs.iter().map(|p| &p.kind).collect::<Vec<_>>(),
        values,
    )?);
    Ok(out)
}

/// Encodes a custom-error payload: `selector || encoded inputs`.
pub fn encode_error_data(
    error: &CustomError,
    values: &[AbiValue],
) -> Result<Vec<u8>, AbiError> {
    let mut out = error.selector().to_vec();
    out.extend(encode_item_inputs(
        &error.inputs.iter().map(|p| &p.kind).collect::<Vec<_>>(),
        values,
    )?);
    Ok(out)
}

/// Encodes constructor arguments (no selector).
pub fn encode_constructor_args(
    constructor: &Constructor,
    values: &[AbiValue],
) -> Result<Vec<u8>, AbiError> {
    encode_item_inputs(
        &constructor.inputs.iter().map(|p| &p.kind).collect::<Vec<_>>(),
        values,
    )
}

fn encode_item_inputs(kinds: &[&ParamType], values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    if kinds.len() != values.len() {
        return Err(AbiError::InvalidLength(format!(
            "{} declared inputs for {} values",
            kinds.len(),
            values.len()
        )));
    }
    let pairs: Vec<(&ParamType, &AbiValue)> = kinds.iter().copied().zip(values).collect();
    encode_sequence(&pairs)
}

/// Encodes a head region followed by the concatenated dynamic bodies.
/// Offsets are measured from the start of this sequence's head.
fn encode_sequence(pairs: &[(&ParamType, &AbiValue)]) -> Result<Vec<u8>, AbiError> {
    let head_size: usize = pairs.iter().map(|(ty, _)| ty.head_size()).sum();
    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for (ty, value) in pairs {
        if ty.is_dynamic() {
            head.extend_from_slice(&usize_word(head_size + tail.len()));
            encode_tail_value(ty, value, &mut tail)?;
        } else {
            encode_static_value(ty, value, &mut head)?;
        }
    }

    head.extend_from_slice(&tail);
    Ok(head)
}

/// Encodes a static value inline. Static composites (tuples, fixed arrays)
/// concatenate their members' static encodings.
fn encode_static_value(
    ty: &ParamType,
    value: &AbiValue,
    out: &mut Vec<u8>,
) -> Result<(), AbiError> {
    match (ty, value) {
        (ParamType::Bool, AbiValue::Bool(b)) => {
            let mut word = [0u8; 32];
            word[31] = *b as u8;
            out.extend_from_slice(&word);
            Ok(())
        }

        (ParamType::Uint(bits), AbiValue::Uint(v)) => {
            if !uint_fits(*v, *bits) {
                return Err(AbiError::ValueOutOfRange(format!(
                    "value does not fit uint{bits}"
                )));
            }
            out.extend_from_slice(&v.to_be_bytes::<32>());
            Ok(())
        }

        (ParamType::Int(bits), AbiValue::Int(v)) => {
            let raw = v.into_raw();
            if !int_fits(raw, *bits) {
                return Err(AbiError::ValueOutOfRange(format!(
                    "value does not fit int{bits}"
                )));
            }
            out.extend_from_slice(&raw.to_be_bytes::<32>());
            Ok(())
        }

        (ParamType::Address, AbiValue::Address(addr)) => {
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(addr);
            out.extend_from_slice(&word);
            Ok(())
        }

        (ParamType::FixedBytes(size), AbiValue::FixedBytes(bytes)) => {
            if bytes.len() != *size {
                return Err(AbiError::InvalidLength(format!(
                    "bytes{size} value holds {} bytes",
                    bytes.len()
                )));
            }
            let mut word = [0u8; 32];
            word[..bytes.len()].copy_from_slice(bytes);
            out.extend_from_slice(&word);
            Ok(())
        }

        (ParamType::FixedArray(element, size), AbiValue::FixedArray(items)) => {
            if items.len() != *size {
                return Err(AbiError::InvalidLength(format!(
                    "fixed array of {size} holds {} elements",
                    items.len()
                )));
            }
            for item in items {
                encode_static_value(element, item, out)?;
            }
            Ok(())
        }

        (ParamType::Tuple(components), AbiValue::Tuple(fields)) => {
            if fields.len() != components.len() {
                return Err(AbiError::InvalidLength(format!(
                    "tuple of {} holds {} fields",
                    components.len(),
                    fields.len()
                )));
            }
            for (component, field) in components.iter().zip(fields) {
                encode_static_value(component, field, out)?;
            }
            Ok(())
        }

        (ty, value) => Err(mismatch(ty, value)),
    }
}

/// Encodes the tail body of a dynamic value (the offset slot was already
/// written by the caller).
fn encode_tail_value(
    ty: &ParamType,
    value: &AbiValue,
    out: &mut Vec<u8>,
) -> Result<(), AbiError> {
    match (ty, value) {
        (ParamType::String, AbiValue::String(s)) => {
            write_length_prefixed(s.as_bytes(), out);
            Ok(())
        }

        (ParamType::Bytes, AbiValue::Bytes(bytes)) => {
            write_length_prefixed(bytes, out);
            Ok(())
        }

        (ParamType::Array(element), AbiValue::Array(items)) => {
            out.extend_from_slice(&usize_word(items.len()));
            let pairs: Vec<(&ParamType, &AbiValue)> =
                items.iter().map(|item| (element.as_ref(), item)).collect();
            out.extend(encode_sequence(&pairs)?);
            Ok(())
        }

        (ParamType::FixedArray(element, size), AbiValue::FixedArray(items)) => {
            if items.len() != *size {
                return Err(AbiError::InvalidLength(format!(
                    "fixed array of {size} holds {} elements",
                    items.len()
                )));
            }
            let pairs: Vec<(&ParamType, &AbiValue)> =
                items.iter().map(|item| (element.as_ref(), item)).collect();
            out.extend(encode_sequence(&pairs)?);
            Ok(())
        }

        (ParamType::Tuple(components), AbiValue::Tuple(fields)) => {
            if fields.len() != components.len() {
                return Err(AbiError::InvalidLength(format!(
                    "tuple of {} holds {} fields",
                    components.len(),
                    fields.len()
                )));
            }
            let pairs: Vec<(&ParamType, &AbiValue)> =
                components.iter().zip(fields).collect();
            out.extend(encode_sequence(&pairs)?);
            Ok(())
        }

        (ty, value) => Err(mismatch(ty, value)),
    }
}

/// 32-byte length word followed by the payload, zero-padded to a word
/// boundary.
fn write_length_prefixed(payload: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(&usize_word(payload.len()));
    out.extend_from_slice(payload);
    let remainder = payload.len() % 32;
    if remainder != 0 {
        out.extend(std::iter::repeat(0u8).take(32 - remainder));
    }
}

pub(crate) fn usize_word(value: usize) -> [u8; 32] {
    U256::from(value).to_be_bytes::<32>()
}

/// An unsigned value fits `uintN` iff no bit above N is set.
pub(crate) fn uint_fits(value: U256, bits: usize) -> bool {
    bits == 256 || value >> bits == U256::ZERO
}

/// A raw two's-complement word fits `intN` iff the bits from the sign bit up
/// are a pure sign extension.
pub(crate) fn int_fits(raw: U256, bits: usize) -> bool {
    if bits == 256 {
        return true;
    }
    let top = raw >> (bits - 1);
    top == U256::ZERO || top == U256::MAX >> (bits - 1)
}

fn mismatch(ty: &ParamType, value: &AbiValue) -> AbiError {
    AbiError::InvalidParamType(format!(
        "{} value does not fit `{}`",
        value.kind_name(),
        ty.type_string()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::AbiParameter;
    use crate::value::i256_from_i64;
    use alloy_primitives::I256;

    fn encode_one(ty: ParamType, value: AbiValue) -> Vec<u8> {
        encode_parameters(&[ty], &[value]).unwrap()
    }

    #[test]
    fn encode_bool() {
        let out = encode_one(ParamType::Bool, AbiValue::Bool(true));
        assert_eq!(
            hex::encode(out),
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
    }

    #[test]
    fn encode_address() {
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&hex::decode("4648451b5f87ff8f0f7d622bd40574bb97e25980").unwrap());
        let out = encode_one(ParamType::Address, AbiValue::Address(addr));
        assert_eq!(
            hex::encode(out),
            "0000000000000000000000004648451b5f87ff8f0f7d622bd40574bb97e25980"
        );
    }

    #[test]
    fn encode_uint256_spec_vector() {
        let out = encode_one(ParamType::Uint(256), AbiValue::uint64(69_420));
        assert_eq!(
            hex::encode(out),
            "0000000000000000000000000000000000000000000000000000000000010f2c"
        );
    }

    #[test]
    fn encode_string_foo() {
        let out = encode_one(ParamType::String, AbiValue::String("foo".into()));
        assert_eq!(
            hex::encode(out),
            concat!(
                "0000000000000000000000000000000000000000000000000000000000000020",
                "0000000000000000000000000000000000000000000000000000000000000003",
                "666f6f0000000000000000000000000000000000000000000000000000000000",
            )
        );
    }

    #[test]
    fn encode_dynamic_int_array() {
        let out = encode_one(
            ParamType::array(ParamType::Int(256)),
            AbiValue::Array(vec![
                AbiValue::int64(4),
                AbiValue::int64(2),
                AbiValue::int64(0),
            ]),
        );
        assert_eq!(
            hex::encode(out),
            concat!(
                "0000000000000000000000000000000000000000000000000000000000000020",
                "0000000000000000000000000000000000000000000000000000000000000003",
                "0000000000000000000000000000000000000000000000000000000000000004",
                "0000000000000000000000000000000000000000000000000000000000000002",
                "0000000000000000000000000000000000000000000000000000000000000000",
            )
        );
    }

    #[test]
    fn encode_negative_int_sign_extends() {
        let out = encode_one(ParamType::Int(256), AbiValue::int64(-1));
        assert_eq!(hex::encode(out), "f".repeat(64));
    }

    #[test]
    fn encode_function_call_with_selector() {
        let func = Function {
            name: "bar".into(),
            inputs: vec![AbiParameter::new("x", ParamType::Uint(256))],
            outputs: vec![],
        };
        let out = encode_function_call(&func, &[AbiValue::uint64(1)]).unwrap();
        assert_eq!(hex::encode(&out[..4]), "0423a132");
        assert_eq!(
            hex::encode(&out[4..]),
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
    }

    #[test]
    fn mixed_static_dynamic_heads() {
        let out = encode_parameters(
            &[ParamType::Uint(256), ParamType::String],
            &[AbiValue::uint64(69), AbiValue::String("hi".into())],
        )
        .unwrap();
        assert_eq!(
            hex::encode(out),
            concat!(
                "0000000000000000000000000000000000000000000000000000000000000045",
                "0000000000000000000000000000000000000000000000000000000000000040",
                "0000000000000000000000000000000000000000000000000000000000000002",
                "6869000000000000000000000000000000000000000000000000000000000000",
            )
        );
    }

    #[test]
    fn static_tuple_encodes_inline() {
        let out = encode_parameters(
            &[ParamType::Tuple(vec![ParamType::Bool, ParamType::Uint(8)])],
            &[AbiValue::Tuple(vec![AbiValue::Bool(true), AbiValue::uint64(7)])],
        )
        .unwrap();
        // No offset slot: two words inline.
        assert_eq!(out.len(), 64);
        assert_eq!(out[31], 1);
        assert_eq!(out[63], 7);
    }

    #[test]
    fn dynamic_tuple_uses_offset() {
        let out = encode_parameters(
            &[ParamType::Tuple(vec![ParamType::Bool, ParamType::String])],
            &[AbiValue::Tuple(vec![
                AbiValue::Bool(true),
                AbiValue::String("foo".into()),
            ])],
        )
        .unwrap();
        // offset | bool | inner offset | len | payload
        assert_eq!(out.len(), 160);
        assert_eq!(out[31], 0x20);
        // Inner offset is relative to the tuple body, not the outer buffer.
        assert_eq!(out[95], 0x40);
    }

    #[test]
    fn fixed_array_of_strings_offsets_are_region_relative() {
        let out = encode_one(
            ParamType::fixed_array(ParamType::String, 2),
            AbiValue::FixedArray(vec![
                AbiValue::String("a".into()),
                AbiValue::String("b".into()),
            ]),
        );
        assert_eq!(out.len(), 224);
        assert_eq!(out[31], 0x20); // outer offset
        assert_eq!(out[63], 0x40); // element 0, relative to region at 0x20
        assert_eq!(out[95], 0x80); // element 1
    }

    #[test]
    fn empty_dynamic_values() {
        let out = encode_one(ParamType::Bytes, AbiValue::Bytes(vec![]));
        // offset + zero length, no payload words.
        assert_eq!(out.len(), 64);

        let out = encode_one(
            ParamType::array(ParamType::Uint(256)),
            AbiValue::Array(vec![]),
        );
        assert_eq!(out.len(), 64);
    }

    #[test]
    fn output_is_word_aligned() {
        let cases = vec![
            (ParamType::Bool, AbiValue::Bool(false)),
            (ParamType::String, AbiValue::String("abcdefghijklmnopqrstuvwxyz0123456789".into())),
            (ParamType::Bytes, AbiValue::Bytes(vec![1, 2, 3, 4, 5])),
            (
                ParamType::array(ParamType::String),
                AbiValue::Array(vec![AbiValue::String("x".into())]),
            ),
        ];
        for (ty, value) in cases {
            let out = encode_one(ty, value);
            assert_eq!(out.len() % 32, 0);
        }
    }

    #[test]
    fn uint_width_overflow_is_rejected() {
        let result = encode_parameters(&[ParamType::Uint(8)], &[AbiValue::uint64(256)]);
        assert!(matches!(result, Err(AbiError::ValueOutOfRange(_))));
        assert!(encode_parameters(&[ParamType::Uint(8)], &[AbiValue::uint64(255)]).is_ok());
    }

    #[test]
    fn int_width_overflow_is_rejected() {
        let ok = encode_parameters(&[ParamType::Int(8)], &[AbiValue::int64(-128)]);
        assert!(ok.is_ok());
        let result = encode_parameters(&[ParamType::Int(8)], &[AbiValue::int64(-129)]);
        assert!(matches!(result, Err(AbiError::ValueOutOfRange(_))));
        let result = encode_parameters(&[ParamType::Int(8)], &[AbiValue::int64(128)]);
        assert!(matches!(result, Err(AbiError::ValueOutOfRange(_))));
    }

    #[test]
    fn int256_extremes_fit() {
        assert!(encode_parameters(&[ParamType::Int(256)], &[AbiValue::Int(I256::MAX)]).is_ok());
        assert!(encode_parameters(&[ParamType::Int(256)], &[AbiValue::Int(I256::MIN)]).is_ok());
        assert_eq!(
            hex::encode(encode_one(ParamType::Int(16), AbiValue::Int(i256_from_i64(-2)))),
            "f".repeat(63) + "e"
        );
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let result = encode_parameters(&[ParamType::Bool], &[AbiValue::uint64(1)]);
        assert!(matches!(result, Err(AbiError::InvalidParamType(_))));
    }

    #[test]
    fn fixed_bytes_arity_is_checked() {
        let result = encode_parameters(
            &[ParamType::FixedBytes(4)],
            &[AbiValue::FixedBytes(vec![1, 2, 3])],
        );
        assert!(matches!(result, Err(AbiError::InvalidLength(_))));
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let result = encode_parameters(&[ParamType::Bool], &[]);
        assert!(matches!(result, Err(AbiError::InvalidLength(_))));
    }

    #[test]
    fn encoding_is_deterministic() {
        let types = [
            ParamType::array(ParamType::String),
            ParamType::Tuple(vec![ParamType::Bool, ParamType::Bytes]),
        ];
        let values = [
            AbiValue::Array(vec![AbiValue::String("one".into()), AbiValue::String("two".into())]),
            AbiValue::Tuple(vec![AbiValue::Bool(true), AbiValue::Bytes(vec![9, 9])]),
        ];
        assert_eq!(
            encode_parameters(&types, &values).unwrap(),
            encode_parameters(&types, &values).unwrap()
        );
    }
}
