use crypto_utils::{sha256, Signature};
use eth_rlp::{decode, encode, RlpItem};

use crate::envelope::Eip4844Envelope;
use crate::error::TxError;
use crate::serialize::{decode_eip4844_fields, eip4844_fields};

/// Maximum number of blobs a transaction (and block) may carry.
pub const MAX_BLOB_NUMBER_PER_BLOCK: usize = 6;

/// Version byte tagging KZG commitments in versioned hashes.
pub const VERSIONED_HASH_VERSION_KZG: u8 = 0x01;

/// Size of one blob: 4096 field elements of 32 bytes.
pub const BYTES_PER_BLOB: usize = 131_072;

/// An EIP-4844 blob payload.
#[derive(Clone, PartialEq, Eq)]
pub struct Blob(Vec<u8>);

impl Blob {
    /// Wraps exactly [`BYTES_PER_BLOB`] bytes.
    pub fn new(data: Vec<u8>) -> Result<Self, TxError> {
        if data.len() != BYTES_PER_BLOB {
            return Err(TxError::MalformedEnvelope(format!(
                "blob holds {} bytes, expected {BYTES_PER_BLOB}",
                data.len()
            )));
        }
        Ok(Self(data))
    }

    /// An all-zero blob (a valid field-element encoding).
    pub fn zero() -> Self {
        Self(vec![0u8; BYTES_PER_BLOB])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Blob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Blob({} bytes)", self.0.len())
    }
}

/// Capability interface for KZG commitment/proof generation. Implementations
/// wrap a trusted setup; `loaded` reports whether it is usable.
pub trait Kzg {
    fn blob_to_commitment(&self, blob: &Blob) -> Result<[u8; 48], TxError>;
    fn compute_blob_proof(&self, blob: &Blob, commitment: &[u8; 48]) -> Result<[u8; 48], TxError>;
    fn loaded(&self) -> bool;
}

/// `0x01 || sha256(commitment)[1..]` per EIP-4844.
pub fn commitment_to_versioned_hash(commitment: &[u8; 48]) -> [u8; 32] {
    let mut hash = sha256(commitment);
    hash[0] = VERSIONED_HASH_VERSION_KZG;
    hash
}

/// The `(blobs, commitments, proofs)` triple transported alongside an
/// EIP-4844 transaction. The three lists always have equal length, at most
/// [`MAX_BLOB_NUMBER_PER_BLOCK`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobSidecar {
    pub blobs: Vec<Blob>,
    pub commitments: Vec<[u8; 48]>,
    pub proofs: Vec<[u8; 48]>,
}

impl BlobSidecar {
    /// Builds the sidecar by running every blob through the KZG capability.
    pub fn from_blobs(blobs: Vec<Blob>, kzg: &dyn Kzg) -> Result<Self, TxError> {
        if blobs.is_empty() {
            return Err(TxError::EmptyBlobs);
        }
        if blobs.len() > MAX_BLOB_NUMBER_PER_BLOCK {
            return Err(TxError::TooManyBlobs {
                count: blobs.len(),
                max: MAX_BLOB_NUMBER_PER_BLOCK,
            });
        }
        if !kzg.loaded() {
            return Err(TxError::Kzg("trusted setup is not loaded".into()));
        }

        let mut commitments = Vec::with_capacity(blobs.len());
        let mut proofs = Vec::with_capacity(blobs.len());
        for blob in &blobs {
            let commitment = kzg.blob_to_commitment(blob)?;
            proofs.push(kzg.compute_blob_proof(blob, &commitment)?);
            commitments.push(commitment);
        }

        Ok(Self {
            blobs,
            commitments,
            proofs,
        })
    }

    /// The versioned hashes the envelope must reference, in blob order.
    pub fn versioned_hashes(&self) -> Vec<[u8; 32]> {
        self.commitments
            .iter()
            .map(commitment_to_versioned_hash)
            .collect()
    }

    /// Checks the equal-length and cap invariants.
    pub fn validate(&self) -> Result<(), TxError> {
        if self.blobs.is_empty() {
            return Err(TxError::EmptyBlobs);
        }
        if self.blobs.len() > MAX_BLOB_NUMBER_PER_BLOCK {
            return Err(TxError::TooManyBlobs {
                count: self.blobs.len(),
                max: MAX_BLOB_NUMBER_PER_BLOCK,
            });
        }
        if self.commitments.len() != self.blobs.len() || self.proofs.len() != self.blobs.len() {
            return Err(TxError::MalformedEnvelope(format!(
                "sidecar lists diverge: {} blobs, {} commitments, {} proofs",
                self.blobs.len(),
                self.commitments.len(),
                self.proofs.len()
            )));
        }
        Ok(())
    }
}

/// Emits the network (pooled) form of a blob transaction:
/// `0x03 || rlp([tx_payload_body, blobs, commitments, proofs])`.
pub fn serialize_with_sidecar(
    envelope: &Eip4844Envelope,
    signature: Option<&Signature>,
    sidecar: &BlobSidecar,
) -> Result<Vec<u8>, TxError> {
    sidecar.validate()?;
    tracing::debug!(blobs = sidecar.blobs.len(), "assembling blob sidecar payload");

    let wrapper = RlpItem::list(vec![
        RlpItem::list(eip4844_fields(envelope, signature)),
        RlpItem::list(
            sidecar
                .blobs
                .iter()
                .map(|blob| RlpItem::bytes(blob.as_bytes()))
                .collect(),
        ),
        RlpItem::list(
            sidecar
                .commitments
                .iter()
                .map(|c| RlpItem::bytes(c.as_slice()))
                .collect(),
        ),
        RlpItem::list(
            sidecar
                .proofs
                .iter()
                .map(|p| RlpItem::bytes(p.as_slice()))
                .collect(),
        ),
    ]);

    let mut out = vec![0x03];
    out.extend(encode(&wrapper));
    Ok(out)
}

/// Parses the network form back into envelope, signature and sidecar.
pub fn deserialize_with_sidecar(
    data: &[u8],
) -> Result<(Eip4844Envelope, Option<Signature>, BlobSidecar), TxError> {
    let first = *data
        .first()
        .ok_or_else(|| TxError::MalformedEnvelope("empty input".into()))?;
    if first != 0x03 {
        return Err(TxError::UnsupportedTransactionType(first));
    }

    let wrapper = decode(&data[1..])?;
    let parts = wrapper.as_list()?;
    if parts.len() != 4 {
        return Err(TxError::MalformedEnvelope(format!(
            "sidecar wrapper has {} parts",
            parts.len()
        )));
    }

    let (envelope, signature) = decode_eip4844_fields(parts[0].as_list()?)?;

    let blobs = parts[1]
        .as_list()?
        .iter()
        .map(|item| Blob::new(item.as_bytes()?.to_vec()))
        .collect::<Result<Vec<_>, _>>()?;
    let commitments = fixed_list::<48>(parts[2].as_list()?)?;
    let proofs = fixed_list::<48>(parts[3].as_list()?)?;

    let sidecar = BlobSidecar {
        blobs,
        commitments,
        proofs,
    };
    sidecar.validate()?;
    Ok((envelope, signature, sidecar))
}

fn fixed_list<const N: usize>(items: &[RlpItem]) -> Result<Vec<[u8; N]>, TxError> {
    items
        .iter()
        .map(|item| {
            let bytes = item.as_bytes()?;
            if bytes.len() != N {
                return Err(TxError::MalformedEnvelope(format!(
                    "expected a {N}-byte element, got {}",
                    bytes.len()
                )));
            }
            let mut out = [0u8; N];
            out.copy_from_slice(bytes);
            Ok(out)
        })
        .collect()
}
