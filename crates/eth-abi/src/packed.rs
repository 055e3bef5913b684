use crate::encoder::{int_fits, uint_fits};
use crate::error::AbiError;
use crate::param::ParamType;
use crate::value::AbiValue;

/// Non-standard packed encoding: values are concatenated with no padding,
/// length prefixes or offset tables.
///
/// Numbers emit their declared width (`bits / 8` big-endian bytes), `bool`
/// one byte, `address` 20 bytes, `bytesN` its N bytes, `string`/`bytes` the
/// raw payload. Array elements use the standard padded 32-byte form; tuple
/// components pack recursively. The output is not invertible and is intended
/// for off-chain hashing only.
pub fn encode_packed(types: &[ParamType], values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::InvalidLength(format!(
            "{} parameter types for {} values",
            types.len(),
            values.len()
        )));
    }

    let mut out = Vec::new();
    for (ty, value) in types.iter().zip(values) {
        pack_value(ty, value, false, &mut out)?;
    }
    Ok(out)
}

fn pack_value(
    ty: &ParamType,
    value: &AbiValue,
    in_array: bool,
    out: &mut Vec<u8>,
) -> Result<(), AbiError> {
    match (ty, value) {
        (ParamType::Bool, AbiValue::Bool(b)) => {
            if in_array {
                out.extend_from_slice(&[0u8; 31]);
            }
            out.push(*b as u8);
            Ok(())
        }

        (ParamType::Uint(bits), AbiValue::Uint(v)) => {
            if !uint_fits(*v, *bits) {
                return Err(AbiError::ValueOutOfRange(format!(
                    "value does not fit uint{bits}"
                )));
            }
            let word = v.to_be_bytes::<32>();
            let width = if in_array { 32 } else { bits / 8 };
            out.extend_from_slice(&word[32 - width..]);
            Ok(())
        }

        (ParamType::Int(bits), AbiValue::Int(v)) => {
            let raw = v.into_raw();
            if !int_fits(raw, *bits) {
                return Err(AbiError::ValueOutOfRange(format!(
                    "value does not fit int{bits}"
                )));
            }
            let word = raw.to_be_bytes::<32>();
            let width = if in_array { 32 } else { bits / 8 };
            out.extend_from_slice(&word[32 - width..]);
            Ok(())
        }

        (ParamType::Address, AbiValue::Address(addr)) => {
            if in_array {
                out.extend_from_slice(&[0u8; 12]);
            }
            out.extend_from_slice(addr);
            Ok(())
        }

        (ParamType::FixedBytes(size), AbiValue::FixedBytes(bytes)) => {
            if bytes.len() != *size {
                return Err(AbiError::InvalidLength(format!(
                    "bytes{size} value holds {} bytes",
                    bytes.len()
                )));
            }
            out.extend_from_slice(bytes);
            if in_array {
                // Right-padded to a full word inside arrays.
                out.extend(std::iter::repeat(0u8).take(32 - bytes.len()));
            }
            Ok(())
        }

        (ParamType::String, AbiValue::String(s)) => {
            if in_array {
                return Err(AbiError::InvalidParamType(
                    "string cannot be packed inside an array".into(),
                ));
            }
            out.extend_from_slice(s.as_bytes());
            Ok(())
        }

        (ParamType::Bytes, AbiValue::Bytes(bytes)) => {
            if in_array {
                return Err(AbiError::InvalidParamType(
                    "bytes cannot be packed inside an array".into(),
                ));
            }
            out.extend_from_slice(bytes);
            Ok(())
        }

        (ParamType::Array(element), AbiValue::Array(items)) => {
            for item in items {
                pack_value(element, item, true, out)?;
            }
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
                pack_value(element, item, true, out)?;
            }
            Ok(())
        }

        (ParamType::Tuple(components), AbiValue::Tuple(fields)) => {
            if in_array {
                return Err(AbiError::InvalidParamType(
                    "tuple cannot be packed inside an array".into(),
                ));
            }
            if fields.len() != components.len() {
                return Err(AbiError::InvalidLength(format!(
                    "tuple of {} holds {} fields",
                    components.len(),
                    fields.len()
                )));
            }
            for (component, field) in components.iter().zip(fields) {
                pack_value(component, field, false, out)?;
            }
            Ok(())
        }

        (ty, value) => Err(AbiError::InvalidParamType(format!(
            "{} value does not fit `{}`",
            value.kind_name(),
            ty.type_string()
        ))),
    }
}
