use crate::error::AbiError;

/// A Solidity ABI parameter type.
///
/// The tree is immutable once built and owns its children; recursive variants
/// box the element type. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// 20-byte account identifier.
    Address,
    Bool,
    /// Dynamic UTF-8 string.
    String,
    /// Dynamic byte string.
    Bytes,
    /// `bytesN`, 1 <= N <= 32.
    FixedBytes(usize),
    /// `uintN`, N a multiple of 8 in 8..=256.
    Uint(usize),
    /// `intN`, N a multiple of 8 in 8..=256.
    Int(usize),
    /// `T[]`.
    Array(Box<ParamType>),
    /// `T[N]`.
    FixedArray(Box<ParamType>, usize),
    /// `(T1,...,Tn)`.
    Tuple(Vec<ParamType>),
}

impl ParamType {
    /// Builds `uintN`, rejecting widths outside 8..=256 or not multiples of 8.
    pub fn uint(bits: usize) -> Result<Self, AbiError> {
        check_int_width(bits)?;
        Ok(ParamType::Uint(bits))
    }

    /// Builds `intN`, rejecting widths outside 8..=256 or not multiples of 8.
    pub fn int(bits: usize) -> Result<Self, AbiError> {
        check_int_width(bits)?;
        Ok(ParamType::Int(bits))
    }

    /// Builds `bytesN`, rejecting sizes outside 1..=32.
    pub fn fixed_bytes(size: usize) -> Result<Self, AbiError> {
        if size == 0 || size > 32 {
            return Err(AbiError::InvalidTypeString(format!(
                "bytes{size} is out of the bytes1..bytes32 range"
            )));
        }
        Ok(ParamType::FixedBytes(size))
    }

    pub fn array(element: ParamType) -> Self {
        ParamType::Array(Box::new(element))
    }

    pub fn fixed_array(element: ParamType, size: usize) -> Self {
        ParamType::FixedArray(Box::new(element), size)
    }

    /// Whether the type uses tail encoding (offset in the head region).
    ///
    /// `string`, `bytes` and `T[]` are always dynamic; tuples and fixed
    /// arrays are dynamic iff a component is.
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::String | ParamType::Bytes | ParamType::Array(_) => true,
            ParamType::FixedArray(element, _) => element.is_dynamic(),
            ParamType::Tuple(components) => components.iter().any(ParamType::is_dynamic),
            _ => false,
        }
    }

    /// The canonical Solidity type string: `uint256`, `(bool,string)[]`, ...
    pub fn type_string(&self) -> String {
        match self {
            ParamType::Address => "address".into(),
            ParamType::Bool => "bool".into(),
            ParamType::String => "string".into(),
            ParamType::Bytes => "bytes".into(),
            ParamType::FixedBytes(size) => format!("bytes{size}"),
            ParamType::Uint(bits) => format!("uint{bits}"),
            ParamType::Int(bits) => format!("int{bits}"),
            ParamType::Array(element) => format!("{}[]", element.type_string()),
            ParamType::FixedArray(element, size) => {
                format!("{}[{size}]", element.type_string())
            }
            ParamType::Tuple(components) => {
                let inner: Vec<String> =
                    components.iter().map(ParamType::type_string).collect();
                format!("({})", inner.join(","))
            }
        }
    }

    /// Parses a canonical type string, the inverse of [`type_string`].
    ///
    /// `uint` and `int` aliases resolve to their 256-bit forms.
    ///
    /// [`type_string`]: ParamType::type_string
    pub fn parse(s: &str) -> Result<Self, AbiError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AbiError::InvalidTypeString("empty type string".into()));
        }

        let (base_str, suffix) = if let Some(rest) = s.strip_prefix('(') {
            let close = find_matching_paren(rest)?;
            (&s[..close + 2], &s[close + 2..])
        } else {
            let end = s.find('[').unwrap_or(s.len());
            (&s[..end], &s[end..])
        };

        let base = if base_str.starts_with('(') {
            let inner = &base_str[1..base_str.len() - 1];
            let components = split_top_level(inner)
                .into_iter()
                .map(ParamType::parse)
                .collect::<Result<Vec<_>, _>>()?;
            ParamType::Tuple(components)
        } else {
            parse_elementary(base_str)?
        };

        apply_array_suffixes(base, suffix)
    }

    /// Static encoded footprint in bytes; dynamic types occupy a 32-byte
    /// offset slot instead.
    pub(crate) fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return 32;
        }
        match self {
            ParamType::FixedArray(element, size) => size * element.head_size(),
            ParamType::Tuple(components) => {
                components.iter().map(ParamType::head_size).sum()
            }
            _ => 32,
        }
    }
}

fn check_int_width(bits: usize) -> Result<(), AbiError> {
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(AbiError::InvalidTypeString(format!(
            "integer width {bits} must be a multiple of 8 in 8..=256"
        )));
    }
    Ok(())
}

fn parse_elementary(s: &str) -> Result<ParamType, AbiError> {
    match s {
        "address" => Ok(ParamType::Address),
        "bool" => Ok(ParamType::Bool),
        "string" => Ok(ParamType::String),
        "bytes" => Ok(ParamType::Bytes),
        "uint" => Ok(ParamType::Uint(256)),
        "int" => Ok(ParamType::Int(256)),
        _ => {
            if let Some(digits) = s.strip_prefix("uint") {
                ParamType::uint(parse_width(s, digits)?)
            } else if let Some(digits) = s.strip_prefix("int") {
                ParamType::int(parse_width(s, digits)?)
            } else if let Some(digits) = s.strip_prefix("bytes") {
                ParamType::fixed_bytes(parse_width(s, digits)?)
            } else {
                Err(AbiError::InvalidTypeString(format!("unknown type `{s}`")))
            }
        }
    }
}

fn parse_width(full: &str, digits: &str) -> Result<usize, AbiError> {
    digits
        .parse()
        .map_err(|_| AbiError::InvalidTypeString(format!("unknown type `{full}`")))
}

/// Applies `[]` / `[N]` suffixes left to right.
fn apply_array_suffixes(mut base: ParamType, mut suffix: &str) -> Result<ParamType, AbiError> {
    while !suffix.is_empty() {
        let close = suffix
            .find(']')
            .ok_or_else(|| AbiError::InvalidTypeString(format!("unclosed array suffix `{suffix}`")))?;
        if !suffix.starts_with('[') {
            return Err(AbiError::InvalidTypeString(format!(
                "malformed array suffix `{suffix}`"
            )));
        }
        let size_str = &suffix[1..close];
        base = if size_str.is_empty() {
            ParamType::array(base)
        } else {
            let size = size_str.parse().map_err(|_| {
                AbiError::InvalidTypeString(format!("bad array size `{size_str}`"))
            })?;
            ParamType::fixed_array(base, size)
        };
        suffix = &suffix[close + 1..];
    }
    Ok(base)
}

/// Index of the `)` matching the implicit `(` already consumed.
fn find_matching_paren(s: &str) -> Result<usize, AbiError> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return Ok(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    Err(AbiError::InvalidTypeString("unbalanced parentheses".into()))
}

/// Splits on commas not nested inside parentheses or brackets.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if !s.is_empty() {
        parts.push(&s[start..]);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_validation() {
        assert!(ParamType::uint(256).is_ok());
        assert!(ParamType::uint(8).is_ok());
        assert!(ParamType::uint(264).is_err());
        assert!(ParamType::uint(7).is_err());
        assert!(ParamType::uint(0).is_err());
        assert!(ParamType::int(12).is_err());
        assert!(ParamType::fixed_bytes(32).is_ok());
        assert!(ParamType::fixed_bytes(0).is_err());
        assert!(ParamType::fixed_bytes(33).is_err());
    }

    #[test]
    fn dynamicity_predicate() {
        assert!(ParamType::String.is_dynamic());
        assert!(ParamType::Bytes.is_dynamic());
        assert!(ParamType::array(ParamType::Bool).is_dynamic());
        assert!(!ParamType::Address.is_dynamic());
        assert!(!ParamType::fixed_array(ParamType::Bool, 3).is_dynamic());
        assert!(ParamType::fixed_array(ParamType::String, 3).is_dynamic());
        assert!(!ParamType::Tuple(vec![ParamType::Bool, ParamType::Uint(8)]).is_dynamic());
        assert!(ParamType::Tuple(vec![ParamType::Bool, ParamType::Bytes]).is_dynamic());
    }

    #[test]
    fn canonical_type_strings() {
        assert_eq!(ParamType::Uint(256).type_string(), "uint256");
        assert_eq!(ParamType::FixedBytes(4).type_string(), "bytes4");
        assert_eq!(
            ParamType::array(ParamType::Tuple(vec![ParamType::Bool, ParamType::String]))
                .type_string(),
            "(bool,string)[]"
        );
        assert_eq!(
            ParamType::fixed_array(ParamType::array(ParamType::Int(128)), 2).type_string(),
            "int128[][2]"
        );
    }

    #[test]
    fn parse_round_trips_type_string() {
        let cases = [
            ParamType::Address,
            ParamType::Bool,
            ParamType::String,
            ParamType::Bytes,
            ParamType::FixedBytes(7),
            ParamType::Uint(40),
            ParamType::Int(256),
            ParamType::array(ParamType::Uint(8)),
            ParamType::fixed_array(ParamType::Address, 5),
            ParamType::Tuple(vec![
                ParamType::Bool,
                ParamType::array(ParamType::Tuple(vec![ParamType::Bytes, ParamType::Int(16)])),
            ]),
            ParamType::array(ParamType::fixed_array(ParamType::Bool, 2)),
        ];
        for ty in cases {
            assert_eq!(ParamType::parse(&ty.type_string()).unwrap(), ty);
        }
    }

    #[test]
    fn parse_uint_alias() {
        assert_eq!(ParamType::parse("uint").unwrap(), ParamType::Uint(256));
        assert_eq!(ParamType::parse("int[]").unwrap(), ParamType::array(ParamType::Int(256)));
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!(ParamType::parse("").is_err());
        assert!(ParamType::parse("uint7").is_err());
        assert!(ParamType::parse("bytes33").is_err());
        assert!(ParamType::parse("(bool").is_err());
        assert!(ParamType::parse("uint256[").is_err());
        assert!(ParamType::parse("elephant").is_err());
    }

    #[test]
    fn head_sizes() {
        assert_eq!(ParamType::Bool.head_size(), 32);
        assert_eq!(ParamType::String.head_size(), 32);
        assert_eq!(ParamType::fixed_array(ParamType::Bool, 4).head_size(), 128);
        assert_eq!(
            ParamType::Tuple(vec![
                ParamType::Bool,
                ParamType::fixed_array(ParamType::Uint(8), 2)
            ])
            .head_size(),
            96
        );
        // Dynamic tuples collapse to a single offset slot.
        assert_eq!(
            ParamType::Tuple(vec![ParamType::Bool, ParamType::String]).head_size(),
            32
        );
    }
}
