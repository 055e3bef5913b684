//! # crypto-utils
//!
//! Hashing, selector derivation, EIP-55 address handling, secure random
//! generation and the secp256k1 signing capability for the ethkit toolkit.

pub mod address;
pub mod error;
pub mod hash;
pub mod random;
pub mod signer;

pub use error::CryptoError;
pub use hash::{event_topic, keccak256, selector, sha256};
pub use signer::{LocalSigner, Signature, Signer};
