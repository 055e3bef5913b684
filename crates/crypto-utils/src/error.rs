use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("signing error: {0}")]
    SigningError(String),

    #[error("recovery failed: {0}")]
    RecoveryFailed(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}
