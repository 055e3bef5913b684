use serde::{Deserialize, Serialize};

use crate::error::AbiError;
use crate::param::ParamType;

/// A named ABI parameter, as found in JSON ABI `inputs`/`outputs` arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiParameter {
    pub name: String,
    pub kind: ParamType,
    pub internal_type: Option<String>,
}

impl AbiParameter {
    pub fn new(name: impl Into<String>, kind: ParamType) -> Self {
        Self {
            name: name.into(),
            kind,
            internal_type: None,
        }
    }
}

/// Wire shape of a JSON ABI parameter. Tuples carry their components here;
/// conversion into [`AbiParameter`] fails when they are missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawParameter {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    components: Vec<RawParameter>,
    #[serde(
        rename = "internalType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    internal_type: Option<String>,
}

impl TryFrom<RawParameter> for AbiParameter {
    type Error = AbiError;

    fn try_from(raw: RawParameter) -> Result<Self, AbiError> {
        let kind = if let Some(suffix) = raw.ty.strip_prefix("tuple") {
            if raw.components.is_empty() {
                return Err(AbiError::InvalidTypeString(format!(
                    "tuple parameter `{}` carries no components",
                    raw.name
                )));
            }
            let components = raw
                .components
                .into_iter()
                .map(|c| AbiParameter::try_from(c).map(|p| p.kind))
                .collect::<Result<Vec<_>, _>>()?;
            apply_suffixes(ParamType::Tuple(components), suffix)?
        } else {
            ParamType::parse(&raw.ty)?
        };

        Ok(AbiParameter {
            name: raw.name,
            kind,
            internal_type: raw.internal_type,
        })
    }
}

/// Re-applies `[]` / `[N]` suffixes after a `tuple` prefix.
fn apply_suffixes(base: ParamType, suffix: &str) -> Result<ParamType, AbiError> {
    if suffix.is_empty() {
        return Ok(base);
    }
    // Route through the canonical parser by substituting the rendered tuple.
    ParamType::parse(&format!("{}{}", base.type_string(), suffix))
}

impl<'de> Deserialize<'de> for AbiParameter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawParameter::deserialize(deserializer)?;
        AbiParameter::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl Serialize for AbiParameter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        fn to_raw(param: &AbiParameter) -> RawParameter {
            let (ty, components) = render_kind(&param.kind);
            RawParameter {
                name: param.name.clone(),
                ty,
                components,
                internal_type: param.internal_type.clone(),
            }
        }

        /// JSON ABI renders tuples as `tuple[suffix]` plus components.
        fn render_kind(kind: &ParamType) -> (String, Vec<RawParameter>) {
            let mut base = kind;
            let mut suffix = String::new();
            loop {
                match base {
                    ParamType::Array(element) => {
                        suffix = format!("[]{suffix}");
                        base = element;
                    }
                    ParamType::FixedArray(element, size) => {
                        suffix = format!("[{size}]{suffix}");
                        base = element;
                    }
                    _ => break,
                }
            }
            match base {
                ParamType::Tuple(components) => {
                    let raw = components
                        .iter()
                        .map(|c| to_raw(&AbiParameter::new("", c.clone())))
                        .collect();
                    (format!("tuple{suffix}"), raw)
                }
                other => (format!("{}{suffix}", other.type_string()), Vec::new()),
            }
        }

        to_raw(self).serialize(serializer)
    }
}

/// A function ABI item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParameter>,
    #[serde(default)]
    pub outputs: Vec<AbiParameter>,
}

impl Function {
    /// The canonical signature `name(type1,type2,...)`.
    pub fn signature(&self) -> String {
        signature(&self.name, &self.inputs)
    }

    /// First 4 bytes of the Keccak-256 of the canonical signature.
    pub fn selector(&self) -> [u8; 4] {
        crypto_utils::selector(&self.signature())
    }
}

/// A Solidity custom error ABI item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomError {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParameter>,
}

impl CustomError {
    pub fn signature(&self) -> String {
        signature(&self.name, &self.inputs)
    }

    pub fn selector(&self) -> [u8; 4] {
        crypto_utils::selector(&self.signature())
    }
}

/// A constructor ABI item. Constructors have no name and no selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constructor {
    #[serde(default)]
    pub inputs: Vec<AbiParameter>,
}

fn signature(name: &str, inputs: &[AbiParameter]) -> String {
    let types: Vec<String> = inputs.iter().map(|p| p.kind.type_string()).collect();
    format!("{name}({})", types.join(","))
}
