use thiserror::Error;

use crypto_utils::CryptoError;
use eth_rlp::RlpError;

/// Transaction serialization and assertion errors.
#[derive(Debug, Error)]
pub enum TxError {
    /// The envelope's chain id does not match the configured network.
    #[error("invalid chain id: expected {expected}, envelope has {got:?}")]
    InvalidChainId { expected: u64, got: Option<u64> },

    /// `maxPriorityFeePerGas` exceeds `maxFeePerGas`.
    #[error("transaction tip {priority_fee} exceeds max fee {max_fee}")]
    TransactionTipTooHigh { priority_fee: u128, max_fee: u128 },

    /// A blob envelope carries no versioned hashes.
    #[error("blob transaction carries no blobs")]
    EmptyBlobs,

    /// A blob envelope exceeds the per-block blob cap.
    #[error("too many blobs: {count} exceeds the cap of {max}")]
    TooManyBlobs { count: usize, max: usize },

    /// A versioned hash does not start with the KZG version byte.
    #[error("blob versioned hash has unsupported version byte {0:#04x}")]
    BlobVersionNotSupported(u8),

    /// Blob transactions cannot create contracts.
    #[error("blob transaction has no recipient")]
    CreateBlobTransaction,

    /// Unknown EIP-2718 type byte.
    #[error("unsupported transaction type {0:#04x}")]
    UnsupportedTransactionType(u8),

    /// The payload decoded as RLP but does not fit any envelope shape.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// KZG capability failure (proof computation, trusted setup).
    #[error("kzg error: {0}")]
    Kzg(String),

    #[error(transparent)]
    Rlp(#[from] RlpError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = TxError::InvalidChainId {
            expected: 1,
            got: Some(137),
        };
        assert_eq!(err.to_string(), "invalid chain id: expected 1, envelope has Some(137)");

        let err = TxError::TooManyBlobs { count: 7, max: 6 };
        assert_eq!(err.to_string(), "too many blobs: 7 exceeds the cap of 6");

        let err = TxError::UnsupportedTransactionType(0x05);
        assert_eq!(err.to_string(), "unsupported transaction type 0x05");

        let err = TxError::BlobVersionNotSupported(0x02);
        assert_eq!(
            err.to_string(),
            "blob versioned hash has unsupported version byte 0x02"
        );
    }

    #[test]
    fn rlp_errors_convert() {
        let err: TxError = RlpError::UnexpectedEnd.into();
        assert!(matches!(err, TxError::Rlp(RlpError::UnexpectedEnd)));
    }
}
