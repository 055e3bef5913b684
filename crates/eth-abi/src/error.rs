use thiserror::Error;

/// ABI codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    /// A value's shape does not match its declared parameter type.
    #[error("invalid parameter type: {0}")]
    InvalidParamType(String),

    /// A fixed-size byte string or array has the wrong arity.
    #[error("invalid length: {0}")]
    InvalidLength(String),

    /// A numeric value does not fit its declared bit width, or a word holds
    /// an out-of-domain scalar.
    #[error("value out of range: {0}")]
    ValueOutOfRange(String),

    /// The input buffer is misaligned, or an offset/length escapes it.
    #[error("invalid decode data size: {0}")]
    InvalidDecodeDataSize(String),

    /// The payload selector does not match the ABI item being decoded.
    #[error("ABI signature mismatch: expected selector {expected}, got {got}")]
    InvalidAbiSignature { expected: String, got: String },

    /// The decoder crossed its configured byte budget.
    #[error("buffer overrun: {read} bytes read, {max} allowed")]
    BufferOverrun { read: u32, max: u32 },

    /// Bytes remained beyond the consumed region.
    #[error("junk data: {0} trailing bytes beyond the decoded region")]
    JunkData(usize),

    /// A type string could not be parsed or resolved.
    #[error("invalid type string: {0}")]
    InvalidTypeString(String),
}
