use alloy_primitives::{I256, U256};

use crate::error::AbiError;
use crate::param::ParamType;

/// A value conforming to a [`ParamType`]: scalars for elementary types,
/// sequences for arrays, positional records for tuples. The tree owns all of
/// its payloads, so dropping a decoded result releases everything at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Address([u8; 20]),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    /// `bytesN` payload, 1..=32 bytes long.
    FixedBytes(Vec<u8>),
    Uint(U256),
    Int(I256),
    Array(Vec<AbiValue>),
    FixedArray(Vec<AbiValue>),
    Tuple(Vec<AbiValue>),
}

impl AbiValue {
    /// Convenience constructor for small unsigned values.
    pub fn uint64(value: u64) -> Self {
        AbiValue::Uint(U256::from(value))
    }

    /// Convenience constructor for small signed values.
    pub fn int64(value: i64) -> Self {
        AbiValue::Int(i256_from_i64(value))
    }

    /// Checks that the value tree matches the declared type, reporting the
    /// first mismatch. Numeric range checks happen at encode time; this is a
    /// shape check only.
    pub fn type_check(&self, ty: &ParamType) -> Result<(), AbiError> {
        match (self, ty) {
            (AbiValue::Address(_), ParamType::Address)
            | (AbiValue::Bool(_), ParamType::Bool)
            | (AbiValue::String(_), ParamType::String)
            | (AbiValue::Bytes(_), ParamType::Bytes)
            | (AbiValue::Uint(_), ParamType::Uint(_))
            | (AbiValue::Int(_), ParamType::Int(_)) => Ok(()),

            (AbiValue::FixedBytes(bytes), ParamType::FixedBytes(size)) => {
                if bytes.len() != *size {
                    return Err(AbiError::InvalidLength(format!(
                        "bytes{size} value holds {} bytes",
                        bytes.len()
                    )));
                }
                Ok(())
            }

            (AbiValue::Array(items), ParamType::Array(element)) => {
                items.iter().try_for_each(|item| item.type_check(element))
            }

            (AbiValue::FixedArray(items), ParamType::FixedArray(element, size)) => {
                if items.len() != *size {
                    return Err(AbiError::InvalidLength(format!(
                        "fixed array of {size} holds {} elements",
                        items.len()
                    )));
                }
                items.iter().try_for_each(|item| item.type_check(element))
            }

            (AbiValue::Tuple(fields), ParamType::Tuple(components)) => {
                if fields.len() != components.len() {
                    return Err(AbiError::InvalidLength(format!(
                        "tuple of {} holds {} fields",
                        components.len(),
                        fields.len()
                    )));
                }
                fields
                    .iter()
                    .zip(components)
                    .try_for_each(|(field, component)| field.type_check(component))
            }

            (value, ty) => Err(AbiError::InvalidParamType(format!(
                "{} value does not fit `{}`",
                value.kind_name(),
                ty.type_string()
            ))),
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            AbiValue::Address(_) => "address",
            AbiValue::Bool(_) => "bool",
            AbiValue::String(_) => "string",
            AbiValue::Bytes(_) => "bytes",
            AbiValue::FixedBytes(_) => "fixed-bytes",
            AbiValue::Uint(_) => "uint",
            AbiValue::Int(_) => "int",
            AbiValue::Array(_) => "array",
            AbiValue::FixedArray(_) => "fixed-array",
            AbiValue::Tuple(_) => "tuple",
        }
    }
}

/// Two's-complement widening of an `i64` into a 256-bit signed word.
pub(crate) fn i256_from_i64(value: i64) -> I256 {
    let magnitude = U256::from(value.unsigned_abs());
    if value < 0 {
        I256::from_raw(magnitude.wrapping_neg())
    } else {
        I256::from_raw(magnitude)
    }
}
