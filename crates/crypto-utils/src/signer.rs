use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{RecoveryId, SigningKey, VerifyingKey};
use rand_core::OsRng;
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::hash::keccak256;

/// A recoverable secp256k1 signature over a 32-byte hash.
///
/// `y_parity` is the raw recovery bit (0 or 1); the EIP-155 / pre-155 `v`
/// encodings are derived on demand so the same signature can be embedded in
/// any envelope type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    pub y_parity: u8,
}

impl Signature {
    /// The `v` value for a legacy transaction: `35 + parity + 2 * chain_id`
    /// with EIP-155 replay protection, or `27 + parity` without.
    pub fn v(&self, chain_id: Option<u64>) -> u64 {
        match chain_id {
            Some(id) => 35 + u64::from(self.y_parity) + 2 * id,
            None => 27 + u64::from(self.y_parity),
        }
    }

    /// The 65-byte `r || s || v` wire form with `v` in {27, 28}.
    pub fn to_rsv(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = 27 + self.y_parity;
        out
    }

    /// Parses a 65-byte `r || s || v` signature. Accepts `v` as a raw parity
    /// bit (0/1) or in the 27/28 form.
    pub fn from_rsv(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != 65 {
            return Err(CryptoError::InvalidSignature(format!(
                "expected 65 bytes, got {}",
                bytes.len()
            )));
        }

        let v = bytes[64];
        let y_parity = match v {
            0 | 1 => v,
            27 | 28 => v - 27,
            other => {
                return Err(CryptoError::InvalidSignature(format!(
                    "recovery byte {other} out of range"
                )))
            }
        };

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, y_parity })
    }
}

/// Capability interface for producing recoverable signatures over 32-byte
/// hashes. The transaction serializer consumes this; it never sees key
/// material.
pub trait Signer {
    /// Signs a prehashed 32-byte message.
    fn sign_hash(&self, hash: &[u8; 32]) -> Result<Signature, CryptoError>;

    /// The 20-byte address controlled by this signer.
    fn address(&self) -> [u8; 20];
}

/// An in-process signer backed by a k256 secp256k1 key.
pub struct LocalSigner {
    signing_key: SigningKey,
}

impl LocalSigner {
    /// Creates a signer from a raw 32-byte private key. The input copy is
    /// zeroized once the key is constructed.
    pub fn from_bytes(private_key: &[u8; 32]) -> Result<Self, CryptoError> {
        let mut key_bytes = *private_key;
        let signing_key = SigningKey::from_bytes((&key_bytes).into())
            .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
        key_bytes.zeroize();
        Ok(Self { signing_key })
    }

    /// Creates a signer with a fresh OS-random private key.
    pub fn random() -> Self {
        Self {
            signing_key: SigningKey::random(&mut OsRng),
        }
    }
}

impl Signer for LocalSigner {
    fn sign_hash(&self, hash: &[u8; 32]) -> Result<Signature, CryptoError> {
        let (signature, recovery_id): (k256::ecdsa::Signature, RecoveryId) = self
            .signing_key
            .sign_prehash(hash.as_slice())
            .map_err(|e| CryptoError::SigningError(e.to_string()))?;

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&signature.r().to_bytes());
        s.copy_from_slice(&signature.s().to_bytes());

        Ok(Signature {
            r,
            s,
            y_parity: recovery_id.is_y_odd() as u8,
        })
    }

    fn address(&self) -> [u8; 20] {
        pubkey_to_address(self.signing_key.verifying_key())
    }
}

/// Recovers the signing address from a signature over `hash`.
pub fn recover_address(signature: &Signature, hash: &[u8; 32]) -> Result<[u8; 20], CryptoError> {
    let sig = k256::ecdsa::Signature::from_scalars(signature.r, signature.s)
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
    let recid = RecoveryId::from_byte(signature.y_parity)
        .ok_or_else(|| CryptoError::InvalidSignature("recovery bit out of range".into()))?;

    let key = VerifyingKey::recover_from_prehash(hash, &sig, recid)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;
    Ok(pubkey_to_address(&key))
}

/// Keccak-256 of the uncompressed public key (without the 0x04 prefix),
/// last 20 bytes.
fn pubkey_to_address(key: &VerifyingKey) -> [u8; 20] {
    let point = key.to_encoded_point(false);
    let digest = keccak256(&point.as_bytes()[1..]);

    let mut addr = [0u8; 20];
    addr.copy_from_slice(&digest[12..]);
    addr
}
