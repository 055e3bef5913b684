use thiserror::Error;

/// RLP codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RlpError {
    /// Input ended before the announced payload was complete.
    #[error("unexpected end of RLP input")]
    UnexpectedEnd,

    /// A length was encoded in a longer form than required.
    #[error("non-minimal RLP length encoding")]
    NonMinimalLength,

    /// Bytes remained after the top-level item was decoded.
    #[error("trailing bytes after RLP item")]
    TrailingData,

    /// A payload length does not fit the host word size.
    #[error("RLP length overflows usize")]
    LengthOverflow,

    /// An accessor was called on the wrong item kind.
    #[error("expected RLP {0}")]
    UnexpectedItem(&'static str),

    /// An integer field was empty-padded or too wide for the target type.
    #[error("invalid RLP integer: {0}")]
    InvalidInteger(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(RlpError::UnexpectedEnd.to_string(), "unexpected end of RLP input");
        assert_eq!(
            RlpError::NonMinimalLength.to_string(),
            "non-minimal RLP length encoding"
        );
        assert_eq!(RlpError::UnexpectedItem("list").to_string(), "expected RLP list");
        assert_eq!(
            RlpError::InvalidInteger("leading zero byte").to_string(),
            "invalid RLP integer: leading zero byte"
        );
    }
}
