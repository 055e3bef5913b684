use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// An EIP-2930 access list entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessListEntry {
    pub address: [u8; 20],
    pub storage_keys: Vec<[u8; 32]>,
}

/// Pre-EIP-2718 transaction. `chain_id` is `Some` for EIP-155 replay
/// protection (folded into `v` on the signed wire form).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyEnvelope {
    pub chain_id: Option<u64>,
    pub nonce: u64,
    pub gas_price: u128,
    pub gas: u64,
    /// `None` creates a contract.
    pub to: Option<[u8; 20]>,
    pub value: U256,
    pub data: Vec<u8>,
}

/// EIP-2930 (type 0x01): legacy pricing plus an access list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip2930Envelope {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_price: u128,
    pub gas: u64,
    pub to: Option<[u8; 20]>,
    pub value: U256,
    pub data: Vec<u8>,
    pub access_list: Vec<AccessListEntry>,
}

/// EIP-1559 (type 0x02): dynamic fee market.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip1559Envelope {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: u128,
    pub max_fee_per_gas: u128,
    pub gas: u64,
    pub to: Option<[u8; 20]>,
    pub value: U256,
    pub data: Vec<u8>,
    pub access_list: Vec<AccessListEntry>,
}

/// EIP-4844 (type 0x03): blob-carrying transaction. The blobs themselves
/// travel in the sidecar; the envelope only references their versioned
/// hashes. `to` is an `Option` so an unprepared envelope can be represented,
/// but signing asserts it is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip4844Envelope {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: u128,
    pub max_fee_per_gas: u128,
    pub gas: u64,
    pub to: Option<[u8; 20]>,
    pub value: U256,
    pub data: Vec<u8>,
    pub access_list: Vec<AccessListEntry>,
    pub max_fee_per_blob_gas: u128,
    pub blob_versioned_hashes: Vec<[u8; 32]>,
}

/// A transaction envelope tagged by its EIP-2718 type.
///
/// Serializes untagged (the concrete envelope's fields identify it on the
/// wire); deserialize into the concrete envelope type, where the shape is
/// unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TypedEnvelope {
    Legacy(LegacyEnvelope),
    Eip2930(Eip2930Envelope),
    Eip1559(Eip1559Envelope),
    Eip4844(Eip4844Envelope),
}

impl TypedEnvelope {
    /// The EIP-2718 type byte (legacy counts as 0x00 but is serialized
    /// without a prefix).
    pub fn tx_type(&self) -> u8 {
        match self {
            TypedEnvelope::Legacy(_) => 0x00,
            TypedEnvelope::Eip2930(_) => 0x01,
            TypedEnvelope::Eip1559(_) => 0x02,
            TypedEnvelope::Eip4844(_) => 0x03,
        }
    }

    pub fn nonce(&self) -> u64 {
        match self {
            TypedEnvelope::Legacy(tx) => tx.nonce,
            TypedEnvelope::Eip2930(tx) => tx.nonce,
            TypedEnvelope::Eip1559(tx) => tx.nonce,
            TypedEnvelope::Eip4844(tx) => tx.nonce,
        }
    }

    pub fn chain_id(&self) -> Option<u64> {
        match self {
            TypedEnvelope::Legacy(tx) => tx.chain_id,
            TypedEnvelope::Eip2930(tx) => Some(tx.chain_id),
            TypedEnvelope::Eip1559(tx) => Some(tx.chain_id),
            TypedEnvelope::Eip4844(tx) => Some(tx.chain_id),
        }
    }

    pub fn to(&self) -> Option<[u8; 20]> {
        match self {
            TypedEnvelope::Legacy(tx) => tx.to,
            TypedEnvelope::Eip2930(tx) => tx.to,
            TypedEnvelope::Eip1559(tx) => tx.to,
            TypedEnvelope::Eip4844(tx) => tx.to,
        }
    }
}
