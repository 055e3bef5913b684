use sha2::Sha256;
use sha3::{Digest, Keccak256};

/// Computes the Keccak-256 hash of `data`.
///
/// This is the pre-NIST Keccak variant (0x01 padding) used throughout
/// Ethereum, not standardized SHA3-256.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// Computes the SHA-256 hash of `data` (used for blob versioned hashes).
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

/// Derives the 4-byte function/error selector from a canonical signature
/// string such as `"transfer(address,uint256)"`.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = keccak256(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// Derives the 32-byte event topic from a canonical event signature string.
pub fn event_topic(signature: &str) -> [u8; 32] {
    keccak256(signature.as_bytes())
}
