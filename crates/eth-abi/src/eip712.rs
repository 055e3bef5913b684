use std::collections::{BTreeMap, BTreeSet};

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crypto_utils::keccak256;

use crate::encoder::encode_parameters;
use crate::error::AbiError;
use crate::param::ParamType;
use crate::value::{i256_from_i64, AbiValue};

/// A single field of an EIP-712 struct type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl TypedDataField {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Struct type definitions, keyed by type name (`eth_signTypedData_v4`
/// `types` object).
pub type Eip712Types = BTreeMap<String, Vec<TypedDataField>>;

/// Renders `encodeType(primary)`: the primary type first, then every
/// transitively referenced struct type in alphabetical order, each as
/// `Name(type1 name1,type2 name2,...)`.
pub fn encode_type(primary: &str, types: &Eip712Types) -> Result<String, AbiError> {
    let mut seen = BTreeSet::new();
    seen.insert(primary.to_string());
    collect_dependencies(primary, types, &mut seen)?;
    seen.remove(primary);

    let mut out = render_type(primary, types)?;
    for dependency in &seen {
        out.push_str(&render_type(dependency, types)?);
    }
    Ok(out)
}

/// `typeHash(T) = keccak256(encodeType(T))`.
pub fn type_hash(primary: &str, types: &Eip712Types) -> Result<[u8; 32], AbiError> {
    Ok(keccak256(encode_type(primary, types)?.as_bytes()))
}

/// `hashStruct(T, data) = keccak256(typeHash(T) || encodeData(T, data))`.
///
/// Atomic fields are 32-byte padded as in the standard ABI encoding;
/// `bytes`/`string` fields are replaced by their Keccak digest, arrays by the
/// digest of their concatenated element encodings, and nested structs by
/// their own `hashStruct`.
pub fn hash_struct(
    primary: &str,
    data: &Value,
    types: &Eip712Types,
) -> Result<[u8; 32], AbiError> {
    let fields = types.get(primary).ok_or_else(|| {
        AbiError::InvalidTypeString(format!("type `{primary}` is not defined"))
    })?;
    let object = data.as_object().ok_or_else(|| {
        AbiError::InvalidParamType(format!("`{primary}` data must be an object"))
    })?;

    let mut encoded = Vec::with_capacity(32 * (fields.len() + 1));
    encoded.extend_from_slice(&type_hash(primary, types)?);
    for field in fields {
        let value = object.get(&field.name).ok_or_else(|| {
            AbiError::InvalidParamType(format!(
                "`{primary}` data is missing field `{}`",
                field.name
            ))
        })?;
        encoded.extend_from_slice(&encode_field(&field.ty, value, types)?);
    }
    Ok(keccak256(&encoded))
}

/// Hashes the `EIP712Domain` struct. The type string includes exactly the
/// fields present in `domain`, in the conventional order
/// {name, version, chainId, verifyingContract, salt}.
pub fn domain_separator(domain: &Value) -> Result<[u8; 32], AbiError> {
    const DOMAIN_FIELDS: [(&str, &str); 5] = [
        ("name", "string"),
        ("version", "string"),
        ("chainId", "uint256"),
        ("verifyingContract", "address"),
        ("salt", "bytes32"),
    ];

    let object = domain.as_object().ok_or_else(|| {
        AbiError::InvalidParamType("domain must be an object".into())
    })?;

    let fields: Vec<TypedDataField> = DOMAIN_FIELDS
        .iter()
        .filter(|(name, _)| object.contains_key(*name))
        .map(|(name, ty)| TypedDataField::new(*name, *ty))
        .collect();

    let mut types = Eip712Types::new();
    types.insert("EIP712Domain".into(), fields);
    hash_struct("EIP712Domain", domain, &types)
}

/// The final EIP-712 message digest:
/// `keccak256(0x19 || 0x01 || domainSeparator || hashStruct(primary, message))`.
///
/// A missing domain hashes as an empty `EIP712Domain()` struct.
pub fn hash_typed_data(
    types: &Eip712Types,
    primary: &str,
    domain: Option<&Value>,
    message: &Value,
) -> Result<[u8; 32], AbiError> {
    let empty = Value::Object(serde_json::Map::new());
    let separator = domain_separator(domain.unwrap_or(&empty))?;
    let message_hash = hash_struct(primary, message, types)?;

    let mut payload = Vec::with_capacity(66);
    payload.extend_from_slice(&[0x19, 0x01]);
    payload.extend_from_slice(&separator);
    payload.extend_from_slice(&message_hash);
    Ok(keccak256(&payload))
}

fn collect_dependencies(
    name: &str,
    types: &Eip712Types,
    seen: &mut BTreeSet<String>,
) -> Result<(), AbiError> {
    let fields = types.get(name).ok_or_else(|| {
        AbiError::InvalidTypeString(format!("type `{name}` is not defined"))
    })?;
    for field in fields {
        let base = base_type(&field.ty);
        if types.contains_key(base) && seen.insert(base.to_string()) {
            collect_dependencies(base, types, seen)?;
        }
    }
    Ok(())
}

fn render_type(name: &str, types: &Eip712Types) -> Result<String, AbiError> {
    let fields = types.get(name).ok_or_else(|| {
        AbiError::InvalidTypeString(format!("type `{name}` is not defined"))
    })?;
    let rendered: Vec<String> = fields
        .iter()
        .map(|f| format!("{} {}", f.ty, f.name))
        .collect();
    Ok(format!("{name}({})", rendered.join(",")))
}

/// Strips array suffixes: `Person[3][]` -> `Person`.
fn base_type(ty: &str) -> &str {
    ty.split('[').next().unwrap_or(ty)
}

/// Encodes one field to its 32-byte `encodeData` contribution.
fn encode_field(ty: &str, value: &Value, types: &Eip712Types) -> Result<[u8; 32], AbiError> {
    // Arrays hash the concatenation of their elements' encodings.
    if let Some(open) = ty.rfind('[') {
        if !ty.ends_with(']') {
            return Err(AbiError::InvalidTypeString(format!("malformed type `{ty}`")));
        }
        let element_ty = &ty[..open];
        let items = value.as_array().ok_or_else(|| {
            AbiError::InvalidParamType(format!("`{ty}` value must be an array"))
        })?;

        let declared = &ty[open + 1..ty.len() - 1];
        if !declared.is_empty() {
            let size: usize = declared.parse().map_err(|_| {
                AbiError::InvalidTypeString(format!("bad array size in `{ty}`"))
            })?;
            if items.len() != size {
                return Err(AbiError::InvalidLength(format!(
                    "`{ty}` value holds {} elements",
                    items.len()
                )));
            }
        }

        let mut encoded = Vec::with_capacity(items.len() * 32);
        for item in items {
            encoded.extend_from_slice(&encode_field(element_ty, item, types)?);
        }
        return Ok(keccak256(&encoded));
    }

    // Nested structs contribute their hashStruct.
    if types.contains_key(ty) {
        return hash_struct(ty, value, types);
    }

    match ty {
        "string" => {
            let text = value.as_str().ok_or_else(|| {
                AbiError::InvalidParamType("string field must be a JSON string".into())
            })?;
            Ok(keccak256(text.as_bytes()))
        }
        "bytes" => {
            let bytes = hex_value(value, "bytes")?;
            Ok(keccak256(&bytes))
        }
        _ => {
            let kind = ParamType::parse(ty)?;
            if kind.is_dynamic() || matches!(kind, ParamType::Tuple(_)) {
                return Err(AbiError::InvalidTypeString(format!(
                    "`{ty}` is not an EIP-712 atomic type"
                )));
            }
            let abi_value = json_to_atomic(&kind, value)?;
            let word = encode_parameters(&[kind], &[abi_value])?;
            let mut out = [0u8; 32];
            out.copy_from_slice(&word);
            Ok(out)
        }
    }
}

/// Converts a JSON scalar into the [`AbiValue`] for an atomic type.
fn json_to_atomic(kind: &ParamType, value: &Value) -> Result<AbiValue, AbiError> {
    match kind {
        ParamType::Bool => value
            .as_bool()
            .map(AbiValue::Bool)
            .ok_or_else(|| AbiError::InvalidParamType("bool field must be a JSON bool".into())),

        ParamType::Address => {
            let text = value.as_str().ok_or_else(|| {
                AbiError::InvalidParamType("address field must be a string".into())
            })?;
            let stripped = text.strip_prefix("0x").unwrap_or(text);
            let bytes = hex::decode(stripped).map_err(|e| {
                AbiError::InvalidParamType(format!("bad address hex: {e}"))
            })?;
            if bytes.len() != 20 {
                return Err(AbiError::InvalidLength(format!(
                    "address holds {} bytes",
                    bytes.len()
                )));
            }
            let mut addr = [0u8; 20];
            addr.copy_from_slice(&bytes);
            Ok(AbiValue::Address(addr))
        }

        ParamType::Uint(_) => {
            let parsed = if let Some(n) = value.as_u64() {
                U256::from(n)
            } else if let Some(text) = value.as_str() {
                parse_u256(text)?
            } else {
                return Err(AbiError::InvalidParamType(
                    "uint field must be a number or numeric string".into(),
                ));
            };
            Ok(AbiValue::Uint(parsed))
        }

        ParamType::Int(_) => {
            if let Some(n) = value.as_i64() {
                Ok(AbiValue::Int(i256_from_i64(n)))
            } else if let Some(text) = value.as_str() {
                let (negative, digits) = match text.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, text),
                };
                let magnitude = parse_u256(digits)?;
                let raw = if negative { magnitude.wrapping_neg() } else { magnitude };
                Ok(AbiValue::Int(alloy_primitives::I256::from_raw(raw)))
            } else {
                Err(AbiError::InvalidParamType(
                    "int field must be a number or numeric string".into(),
                ))
            }
        }

        ParamType::FixedBytes(size) => {
            let bytes = hex_value(value, "bytesN")?;
            if bytes.len() != *size {
                return Err(AbiError::InvalidLength(format!(
                    "bytes{size} value holds {} bytes",
                    bytes.len()
                )));
            }
            Ok(AbiValue::FixedBytes(bytes))
        }

        other => Err(AbiError::InvalidTypeString(format!(
            "`{}` is not an EIP-712 atomic type",
            other.type_string()
        ))),
    }
}

fn parse_u256(text: &str) -> Result<U256, AbiError> {
    let (digits, radix) = match text.strip_prefix("0x") {
        Some(rest) => (rest, 16),
        None => (text, 10),
    };
    U256::from_str_radix(digits, radix)
        .map_err(|e| AbiError::InvalidParamType(format!("bad numeric value `{text}`: {e}")))
}

fn hex_value(value: &Value, what: &str) -> Result<Vec<u8>, AbiError> {
    let text = value.as_str().ok_or_else(|| {
        AbiError::InvalidParamType(format!("{what} field must be a hex string"))
    })?;
    let stripped = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(stripped).map_err(|e| AbiError::InvalidParamType(format!("bad {what} hex: {e}")))
}
