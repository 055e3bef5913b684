//! Typed Ethereum transaction envelopes for the ethkit toolkit.
//!
//! Serialization follows EIP-2718: typed envelopes emit
//! `type_byte || rlp(fields)` (legacy transactions are a bare RLP list), with
//! the field lists defined by EIP-155/2930/1559/4844. Signing consumes the
//! [`crypto_utils::Signer`] capability; blob proof material enters through
//! the [`sidecar::Kzg`] trait.

pub mod envelope;
pub mod error;
pub mod pool;
pub mod serialize;
pub mod sidecar;

pub use envelope::{
    AccessListEntry, Eip1559Envelope, Eip2930Envelope, Eip4844Envelope, LegacyEnvelope,
    TypedEnvelope,
};
pub use error::TxError;
pub use pool::EnvelopePool;
pub use serialize::{assert_signable, deserialize, serialize, sign, signing_hash};
pub use sidecar::{
    commitment_to_versioned_hash, deserialize_with_sidecar, serialize_with_sidecar, Blob,
    BlobSidecar, Kzg, BYTES_PER_BLOB, MAX_BLOB_NUMBER_PER_BLOCK, VERSIONED_HASH_VERSION_KZG,
};
