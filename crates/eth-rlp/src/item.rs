use crate::error::RlpError;

/// A node in an RLP tree: either a byte string or a list of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    Bytes(Vec<u8>),
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// The empty byte string (`0x80` on the wire).
    pub fn empty() -> Self {
        RlpItem::Bytes(Vec::new())
    }

    /// A byte-string item.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        RlpItem::Bytes(data.into())
    }

    /// A list item.
    pub fn list(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }

    /// An unsigned integer as its minimal big-endian byte string
    /// (zero encodes as the empty string).
    pub fn uint(value: u128) -> Self {
        RlpItem::Bytes(trim_leading_zeros(&value.to_be_bytes()))
    }

    /// A big-endian word (for example a 256-bit scalar) with leading zeros
    /// stripped to the minimal integer form.
    pub fn uint_from_be(word: &[u8]) -> Self {
        RlpItem::Bytes(trim_leading_zeros(word))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, RlpItem::List(_))
    }

    pub fn as_bytes(&self) -> Result<&[u8], RlpError> {
        match self {
            RlpItem::Bytes(b) => Ok(b),
            RlpItem::List(_) => Err(RlpError::UnexpectedItem("byte string")),
        }
    }

    pub fn as_list(&self) -> Result<&[RlpItem], RlpError> {
        match self {
            RlpItem::List(items) => Ok(items),
            RlpItem::Bytes(_) => Err(RlpError::UnexpectedItem("list")),
        }
    }

    /// Decodes a minimal big-endian integer field into `u64`.
    pub fn as_u64(&self) -> Result<u64, RlpError> {
        let bytes = self.int_bytes(8)?;
        let mut out = 0u64;
        for &b in bytes {
            out = out << 8 | u64::from(b);
        }
        Ok(out)
    }

    /// Decodes a minimal big-endian integer field into `u128`.
    pub fn as_u128(&self) -> Result<u128, RlpError> {
        let bytes = self.int_bytes(16)?;
        let mut out = 0u128;
        for &b in bytes {
            out = out << 8 | u128::from(b);
        }
        Ok(out)
    }

    /// Left-pads a minimal integer field into a fixed-size big-endian word.
    pub fn as_word<const N: usize>(&self) -> Result<[u8; N], RlpError> {
        let bytes = self.int_bytes(N)?;
        let mut out = [0u8; N];
        out[N - bytes.len()..].copy_from_slice(bytes);
        Ok(out)
    }

    fn int_bytes(&self, max_len: usize) -> Result<&[u8], RlpError> {
        let bytes = self.as_bytes()?;
        if bytes.first() == Some(&0) {
            return Err(RlpError::InvalidInteger("leading zero byte"));
        }
        if bytes.len() > max_len {
            return Err(RlpError::InvalidInteger("value too wide for target"));
        }
        Ok(bytes)
    }
}

fn trim_leading_zeros(bytes: &[u8]) -> Vec<u8> {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint_strips_leading_zeros() {
        assert_eq!(RlpItem::uint(0), RlpItem::Bytes(vec![]));
        assert_eq!(RlpItem::uint(42), RlpItem::Bytes(vec![42]));
        assert_eq!(RlpItem::uint(0x0400), RlpItem::Bytes(vec![0x04, 0x00]));
    }

    #[test]
    fn uint_from_be_matches_uint() {
        let word = {
            let mut w = [0u8; 32];
            w[30] = 0x04;
            w
        };
        assert_eq!(RlpItem::uint_from_be(&word), RlpItem::uint(0x0400));
    }

    #[test]
    fn as_u64_round_trip() {
        assert_eq!(RlpItem::uint(0).as_u64().unwrap(), 0);
        assert_eq!(RlpItem::uint(21_000).as_u64().unwrap(), 21_000);
        assert_eq!(RlpItem::uint(u64::MAX as u128).as_u64().unwrap(), u64::MAX);
    }

    #[test]
    fn as_u64_rejects_leading_zero() {
        let item = RlpItem::Bytes(vec![0x00, 0x01]);
        assert_eq!(item.as_u64(), Err(RlpError::InvalidInteger("leading zero byte")));
    }

    #[test]
    fn as_u64_rejects_wide_values() {
        let item = RlpItem::Bytes(vec![0x01; 9]);
        assert!(item.as_u64().is_err());
    }

    #[test]
    fn as_word_pads_left() {
        let word: [u8; 32] = RlpItem::uint(1).as_word().unwrap();
        assert_eq!(word[31], 1);
        assert_eq!(&word[..31], &[0u8; 31]);
    }

    #[test]
    fn accessors_reject_wrong_kind() {
        assert!(RlpItem::empty().as_list().is_err());
        assert!(RlpItem::list(vec![]).as_bytes().is_err());
        assert!(RlpItem::list(vec![]).as_u64().is_err());
    }
}
