use alloy_primitives::U256;

use crypto_utils::{keccak256, Signature, Signer};
use eth_rlp::{decode, encode, RlpItem};

use crate::envelope::{
    AccessListEntry, Eip1559Envelope, Eip2930Envelope, Eip4844Envelope, LegacyEnvelope,
    TypedEnvelope,
};
use crate::error::TxError;
use crate::sidecar::{MAX_BLOB_NUMBER_PER_BLOCK, VERSIONED_HASH_VERSION_KZG};

/// Serializes an envelope to its wire form: `type_byte || rlp(fields)` for
/// typed envelopes, a bare RLP list for legacy.
///
/// Without a signature the legacy form emits the EIP-155 signing preimage
/// (`[..., chain_id, 0, 0]`) when a chain id is set; typed envelopes emit
/// their field list without the trailing `(v, r, s)`.
pub fn serialize(envelope: &TypedEnvelope, signature: Option<&Signature>) -> Vec<u8> {
    match envelope {
        TypedEnvelope::Legacy(tx) => encode(&RlpItem::list(legacy_fields(tx, signature))),
        TypedEnvelope::Eip2930(tx) => typed(0x01, eip2930_fields(tx, signature)),
        TypedEnvelope::Eip1559(tx) => typed(0x02, eip1559_fields(tx, signature)),
        TypedEnvelope::Eip4844(tx) => typed(0x03, eip4844_fields(tx, signature)),
    }
}

/// Keccak-256 of the unsigned serialization; the digest handed to the
/// signer.
pub fn signing_hash(envelope: &TypedEnvelope) -> [u8; 32] {
    keccak256(&serialize(envelope, None))
}

/// Asserts, hashes, signs and re-serializes an envelope. The assertion phase
/// runs first so a rejected envelope never consumes the signer.
pub fn sign(
    envelope: &TypedEnvelope,
    signer: &dyn Signer,
    chain_id: u64,
) -> Result<Vec<u8>, TxError> {
    assert_signable(envelope, chain_id)?;
    let hash = signing_hash(envelope);
    let signature = signer.sign_hash(&hash)?;
    tracing::debug!(
        tx_type = envelope.tx_type(),
        nonce = envelope.nonce(),
        "signed transaction envelope"
    );
    Ok(serialize(envelope, Some(&signature)))
}

/// Pre-sign assertions: chain id matches the configured network, the tip
/// does not exceed the fee cap, and blob envelopes reference at least one
/// and at most [`MAX_BLOB_NUMBER_PER_BLOCK`] KZG-versioned hashes with a
/// real recipient.
pub fn assert_signable(envelope: &TypedEnvelope, chain_id: u64) -> Result<(), TxError> {
    if envelope.chain_id() != Some(chain_id) {
        return Err(TxError::InvalidChainId {
            expected: chain_id,
            got: envelope.chain_id(),
        });
    }

    match envelope {
        TypedEnvelope::Eip1559(tx) => {
            check_tip(tx.max_priority_fee_per_gas, tx.max_fee_per_gas)
        }
        TypedEnvelope::Eip4844(tx) => {
            check_tip(tx.max_priority_fee_per_gas, tx.max_fee_per_gas)?;
            if tx.blob_versioned_hashes.is_empty() {
                return Err(TxError::EmptyBlobs);
            }
            if tx.blob_versioned_hashes.len() > MAX_BLOB_NUMBER_PER_BLOCK {
                return Err(TxError::TooManyBlobs {
                    count: tx.blob_versioned_hashes.len(),
                    max: MAX_BLOB_NUMBER_PER_BLOCK,
                });
            }
            if let Some(hash) = tx
                .blob_versioned_hashes
                .iter()
                .find(|h| h[0] != VERSIONED_HASH_VERSION_KZG)
            {
                return Err(TxError::BlobVersionNotSupported(hash[0]));
            }
            if tx.to.is_none() {
                return Err(TxError::CreateBlobTransaction);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn check_tip(priority_fee: u128, max_fee: u128) -> Result<(), TxError> {
    if priority_fee > max_fee {
        return Err(TxError::TransactionTipTooHigh {
            priority_fee,
            max_fee,
        });
    }
    Ok(())
}

/// Parses a wire-form transaction back into its envelope and signature.
pub fn deserialize(data: &[u8]) -> Result<(TypedEnvelope, Option<Signature>), TxError> {
    let &first = data
        .first()
        .ok_or_else(|| TxError::MalformedEnvelope("empty input".into()))?;

    if first >= 0xc0 {
        return decode_legacy(data);
    }
    match first {
        0x01 => decode_eip2930(&data[1..]),
        0x02 => decode_eip1559(&data[1..]),
        0x03 => decode_eip4844(&data[1..]),
        other => Err(TxError::UnsupportedTransactionType(other)),
    }
}

// ─── field-list builders ────────────────────────────────────────────

fn typed(type_byte: u8, fields: Vec<RlpItem>) -> Vec<u8> {
    let mut out = vec![type_byte];
    out.extend(encode(&RlpItem::list(fields)));
    out
}

fn legacy_fields(tx: &LegacyEnvelope, signature: Option<&Signature>) -> Vec<RlpItem> {
    let mut fields = vec![
        RlpItem::uint(tx.nonce.into()),
        RlpItem::uint(tx.gas_price),
        RlpItem::uint(tx.gas.into()),
        address_item(&tx.to),
        u256_item(&tx.value),
        RlpItem::bytes(tx.data.clone()),
    ];
    match signature {
        Some(sig) => {
            fields.push(RlpItem::uint(sig.v(tx.chain_id).into()));
            fields.push(RlpItem::uint_from_be(&sig.r));
            fields.push(RlpItem::uint_from_be(&sig.s));
        }
        None => {
            if let Some(id) = tx.chain_id {
                // EIP-155 signing preimage.
                fields.push(RlpItem::uint(id.into()));
                fields.push(RlpItem::uint(0));
                fields.push(RlpItem::uint(0));
            }
        }
    }
    fields
}

fn eip2930_fields(tx: &Eip2930Envelope, signature: Option<&Signature>) -> Vec<RlpItem> {
    let mut fields = vec![
        RlpItem::uint(tx.chain_id.into()),
        RlpItem::uint(tx.nonce.into()),
        RlpItem::uint(tx.gas_price),
        RlpItem::uint(tx.gas.into()),
        address_item(&tx.to),
        u256_item(&tx.value),
        RlpItem::bytes(tx.data.clone()),
        access_list_item(&tx.access_list),
    ];
    push_parity_signature(&mut fields, signature);
    fields
}

fn eip1559_fields(tx: &Eip1559Envelope, signature: Option<&Signature>) -> Vec<RlpItem> {
    let mut fields = vec![
        RlpItem::uint(tx.chain_id.into()),
        RlpItem::uint(tx.nonce.into()),
        RlpItem::uint(tx.max_priority_fee_per_gas),
        RlpItem::uint(tx.max_fee_per_gas),
        RlpItem::uint(tx.gas.into()),
        address_item(&tx.to),
        u256_item(&tx.value),
        RlpItem::bytes(tx.data.clone()),
        access_list_item(&tx.access_list),
    ];
    push_parity_signature(&mut fields, signature);
    fields
}

pub(crate) fn eip4844_fields(
    tx: &Eip4844Envelope,
    signature: Option<&Signature>,
) -> Vec<RlpItem> {
    let mut fields = vec![
        RlpItem::uint(tx.chain_id.into()),
        RlpItem::uint(tx.nonce.into()),
        RlpItem::uint(tx.max_priority_fee_per_gas),
        RlpItem::uint(tx.max_fee_per_gas),
        RlpItem::uint(tx.gas.into()),
        address_item(&tx.to),
        u256_item(&tx.value),
        RlpItem::bytes(tx.data.clone()),
        access_list_item(&tx.access_list),
        RlpItem::uint(tx.max_fee_per_blob_gas),
        RlpItem::list(
            tx.blob_versioned_hashes
                .iter()
                .map(|h| RlpItem::bytes(h.as_slice()))
                .collect(),
        ),
    ];
    push_parity_signature(&mut fields, signature);
    fields
}

fn push_parity_signature(fields: &mut Vec<RlpItem>, signature: Option<&Signature>) {
    if let Some(sig) = signature {
        fields.push(RlpItem::uint(sig.y_parity.into()));
        fields.push(RlpItem::uint_from_be(&sig.r));
        fields.push(RlpItem::uint_from_be(&sig.s));
    }
}

fn address_item(to: &Option<[u8; 20]>) -> RlpItem {
    match to {
        Some(addr) => RlpItem::bytes(addr.as_slice()),
        None => RlpItem::empty(),
    }
}

fn u256_item(value: &U256) -> RlpItem {
    RlpItem::uint_from_be(&value.to_be_bytes::<32>())
}

fn access_list_item(entries: &[AccessListEntry]) -> RlpItem {
    RlpItem::list(
        entries
            .iter()
            .map(|entry| {
                RlpItem::list(vec![
                    RlpItem::bytes(entry.address.as_slice()),
                    RlpItem::list(
                        entry
                            .storage_keys
                            .iter()
                            .map(|key| RlpItem::bytes(key.as_slice()))
                            .collect(),
                    ),
                ])
            })
            .collect(),
    )
}

// ─── decoding ───────────────────────────────────────────────────────

fn decode_legacy(data: &[u8]) -> Result<(TypedEnvelope, Option<Signature>), TxError> {
    let item = decode(data)?;
    let fields = item.as_list()?;

    let base = |chain_id: Option<u64>| -> Result<LegacyEnvelope, TxError> {
        Ok(LegacyEnvelope {
            chain_id,
            nonce: fields[0].as_u64()?,
            gas_price: fields[1].as_u128()?,
            gas: fields[2].as_u64()?,
            to: decode_to(&fields[3])?,
            value: decode_u256(&fields[4])?,
            data: fields[5].as_bytes()?.to_vec(),
        })
    };

    match fields.len() {
        6 => Ok((TypedEnvelope::Legacy(base(None)?), None)),
        9 => {
            let r = fields[7].as_bytes()?;
            let s = fields[8].as_bytes()?;
            if r.is_empty() && s.is_empty() {
                // EIP-155 signing preimage: [..., chain_id, 0, 0].
                let chain_id = fields[6].as_u64()?;
                return Ok((TypedEnvelope::Legacy(base(Some(chain_id))?), None));
            }

            let v = fields[6].as_u64()?;
            let (chain_id, y_parity) = match v {
                27 | 28 => (None, (v - 27) as u8),
                v if v >= 35 => (Some((v - 35) / 2), ((v - 35) % 2) as u8),
                other => {
                    return Err(TxError::MalformedEnvelope(format!(
                        "legacy v value {other} is out of range"
                    )))
                }
            };
            let signature = Signature {
                r: fields[7].as_word()?,
                s: fields[8].as_word()?,
                y_parity,
            };
            Ok((TypedEnvelope::Legacy(base(chain_id)?), Some(signature)))
        }
        n => Err(TxError::MalformedEnvelope(format!(
            "legacy envelope has {n} fields"
        ))),
    }
}

fn decode_eip2930(payload: &[u8]) -> Result<(TypedEnvelope, Option<Signature>), TxError> {
    let item = decode(payload)?;
    let fields = item.as_list()?;
    let signature = split_parity_signature(fields, 8)?;

    let envelope = Eip2930Envelope {
        chain_id: fields[0].as_u64()?,
        nonce: fields[1].as_u64()?,
        gas_price: fields[2].as_u128()?,
        gas: fields[3].as_u64()?,
        to: decode_to(&fields[4])?,
        value: decode_u256(&fields[5])?,
        data: fields[6].as_bytes()?.to_vec(),
        access_list: decode_access_list(&fields[7])?,
    };
    Ok((TypedEnvelope::Eip2930(envelope), signature))
}

fn decode_eip1559(payload: &[u8]) -> Result<(TypedEnvelope, Option<Signature>), TxError> {
    let item = decode(payload)?;
    let fields = item.as_list()?;
    let signature = split_parity_signature(fields, 9)?;

    let envelope = Eip1559Envelope {
        chain_id: fields[0].as_u64()?,
        nonce: fields[1].as_u64()?,
        max_priority_fee_per_gas: fields[2].as_u128()?,
        max_fee_per_gas: fields[3].as_u128()?,
        gas: fields[4].as_u64()?,
        to: decode_to(&fields[5])?,
        value: decode_u256(&fields[6])?,
        data: fields[7].as_bytes()?.to_vec(),
        access_list: decode_access_list(&fields[8])?,
    };
    Ok((TypedEnvelope::Eip1559(envelope), signature))
}

fn decode_eip4844(payload: &[u8]) -> Result<(TypedEnvelope, Option<Signature>), TxError> {
    let item = decode(payload)?;
    let fields = item.as_list()?;
    let (envelope, signature) = decode_eip4844_fields(fields)?;
    Ok((TypedEnvelope::Eip4844(envelope), signature))
}

pub(crate) fn decode_eip4844_fields(
    fields: &[RlpItem],
) -> Result<(Eip4844Envelope, Option<Signature>), TxError> {
    let signature = split_parity_signature(fields, 11)?;

    let hashes = fields[10]
        .as_list()?
        .iter()
        .map(|item| item.as_bytes().map_err(TxError::from).and_then(word32))
        .collect::<Result<Vec<_>, _>>()?;

    let envelope = Eip4844Envelope {
        chain_id: fields[0].as_u64()?,
        nonce: fields[1].as_u64()?,
        max_priority_fee_per_gas: fields[2].as_u128()?,
        max_fee_per_gas: fields[3].as_u128()?,
        gas: fields[4].as_u64()?,
        to: decode_to(&fields[5])?,
        value: decode_u256(&fields[6])?,
        data: fields[7].as_bytes()?.to_vec(),
        access_list: decode_access_list(&fields[8])?,
        max_fee_per_blob_gas: fields[9].as_u128()?,
        blob_versioned_hashes: hashes,
    };
    Ok((envelope, signature))
}

/// Validates the field count against the unsigned arity and, when the three
/// signature slots are present, decodes `(y_parity, r, s)`.
fn split_parity_signature(
    fields: &[RlpItem],
    unsigned_len: usize,
) -> Result<Option<Signature>, TxError> {
    if fields.len() == unsigned_len {
        return Ok(None);
    }
    if fields.len() != unsigned_len + 3 {
        return Err(TxError::MalformedEnvelope(format!(
            "expected {unsigned_len} or {} fields, got {}",
            unsigned_len + 3,
            fields.len()
        )));
    }

    let parity = fields[unsigned_len].as_u64()?;
    if parity > 1 {
        return Err(TxError::MalformedEnvelope(format!(
            "signature parity {parity} is out of range"
        )));
    }
    Ok(Some(Signature {
        r: fields[unsigned_len + 1].as_word()?,
        s: fields[unsigned_len + 2].as_word()?,
        y_parity: parity as u8,
    }))
}

fn decode_to(item: &RlpItem) -> Result<Option<[u8; 20]>, TxError> {
    let bytes = item.as_bytes()?;
    if bytes.is_empty() {
        return Ok(None);
    }
    if bytes.len() != 20 {
        return Err(TxError::MalformedEnvelope(format!(
            "recipient field holds {} bytes",
            bytes.len()
        )));
    }
    let mut addr = [0u8; 20];
    addr.copy_from_slice(bytes);
    Ok(Some(addr))
}

fn decode_u256(item: &RlpItem) -> Result<U256, TxError> {
    Ok(U256::from_be_bytes(item.as_word::<32>()?))
}

fn word32(bytes: &[u8]) -> Result<[u8; 32], TxError> {
    if bytes.len() != 32 {
        return Err(TxError::MalformedEnvelope(format!(
            "versioned hash holds {} bytes",
            bytes.len()
        )));
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(bytes);
    Ok(out)
}

fn decode_access_list(item: &RlpItem) -> Result<Vec<AccessListEntry>, TxError> {
    item.as_list()?
        .iter()
        .map(|entry| {
            let pair = entry.as_list()?;
            if pair.len() != 2 {
                return Err(TxError::MalformedEnvelope(
                    "access list entry is not a pair".into(),
                ));
            }
            let address_bytes = pair[0].as_bytes()?;
            if address_bytes.len() != 20 {
                return Err(TxError::MalformedEnvelope(format!(
                    "access list address holds {} bytes",
                    address_bytes.len()
                )));
            }
            let mut address = [0u8; 20];
            address.copy_from_slice(address_bytes);

            let storage_keys = pair[1]
                .as_list()?
                .iter()
                .map(|key| key.as_bytes().map_err(TxError::from).and_then(word32))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(AccessListEntry {
                address,
                storage_keys,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL_1559: &str = "02f1827a6980847735940084773594008252099470997970c51812dc3a010c7d01b50e0d17dc79c8880de0b6b3a764000080c0";

    fn sample_1559() -> Eip1559Envelope {
        let mut to = [0u8; 20];
        to.copy_from_slice(&hex::decode("70997970c51812dc3a010c7d01b50e0d17dc79c8").unwrap());
        Eip1559Envelope {
            chain_id: 31_337,
            nonce: 0,
            max_priority_fee_per_gas: 2_000_000_000,
            max_fee_per_gas: 2_000_000_000,
            gas: 21_000,
            to: Some(to),
            value: U256::from(1_000_000_000_000_000_000u128),
            data: vec![],
            access_list: vec![],
        }
    }

    #[test]
    fn canonical_eip1559_vector_round_trips() {
        let raw = hex::decode(CANONICAL_1559).unwrap();
        let (envelope, signature) = deserialize(&raw).unwrap();
        assert!(signature.is_none());
        assert_eq!(envelope, TypedEnvelope::Eip1559(sample_1559()));

        assert_eq!(serialize(&envelope, None), raw);
    }

    #[test]
    fn unsigned_legacy_with_chain_id_has_eip155_preimage() {
        let tx = TypedEnvelope::Legacy(LegacyEnvelope {
            chain_id: Some(1),
            nonce: 9,
            gas_price: 20_000_000_000,
            gas: 21_000,
            to: Some([0x35; 20]),
            value: U256::from(1_000_000_000_000_000_000u128),
            data: vec![],
        });
        let raw = serialize(&tx, None);
        let (back, signature) = deserialize(&raw).unwrap();
        assert!(signature.is_none());
        assert_eq!(back, tx);
    }

    #[test]
    fn eip155_reference_preimage_hash() {
        // Example transaction from EIP-155.
        let tx = TypedEnvelope::Legacy(LegacyEnvelope {
            chain_id: Some(1),
            nonce: 9,
            gas_price: 20_000_000_000,
            gas: 21_000,
            to: Some([0x35; 20]),
            value: U256::from(1_000_000_000_000_000_000u128),
            data: vec![],
        });
        let raw = serialize(&tx, None);
        assert_eq!(
            hex::encode(&raw),
            "ec098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080018080"
        );
        assert_eq!(
            hex::encode(signing_hash(&tx)),
            "daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53"
        );
    }

    #[test]
    fn signed_legacy_folds_chain_id_into_v() {
        let tx = TypedEnvelope::Legacy(LegacyEnvelope {
            chain_id: Some(1),
            nonce: 0,
            gas_price: 1,
            gas: 21_000,
            to: Some([0xAA; 20]),
            value: U256::ZERO,
            data: vec![],
        });
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r[31] = 5;
        s[31] = 6;
        let sig = Signature { r, s, y_parity: 1 };

        let raw = serialize(&tx, Some(&sig));
        let (back, recovered) = deserialize(&raw).unwrap();
        assert_eq!(back, tx);
        assert_eq!(recovered, Some(sig));
    }

    #[test]
    fn pre_eip155_signed_legacy_round_trips() {
        let tx = TypedEnvelope::Legacy(LegacyEnvelope {
            chain_id: None,
            nonce: 3,
            gas_price: 10,
            gas: 30_000,
            to: None, // contract creation
            value: U256::from(7u64),
            data: vec![0xAB, 0xCD],
        });
        let mut r = [0u8; 32];
        r[0] = 1;
        let sig = Signature { r, s: r, y_parity: 0 };

        let (back, recovered) = deserialize(&serialize(&tx, Some(&sig))).unwrap();
        assert_eq!(back, tx);
        assert_eq!(recovered, Some(sig));
    }

    #[test]
    fn eip2930_round_trips_with_access_list() {
        let tx = TypedEnvelope::Eip2930(Eip2930Envelope {
            chain_id: 1,
            nonce: 4,
            gas_price: 1_000_000_000,
            gas: 60_000,
            to: Some([0x11; 20]),
            value: U256::from(1u64),
            data: vec![0xDE, 0xAD],
            access_list: vec![AccessListEntry {
                address: [0x22; 20],
                storage_keys: vec![[0x00; 32], [0x01; 32]],
            }],
        });
        let raw = serialize(&tx, None);
        assert_eq!(raw[0], 0x01);
        let (back, signature) = deserialize(&raw).unwrap();
        assert_eq!(back, tx);
        assert!(signature.is_none());
    }

    #[test]
    fn eip4844_round_trips_signed() {
        let mut hash = [0u8; 32];
        hash[0] = VERSIONED_HASH_VERSION_KZG;
        let tx = TypedEnvelope::Eip4844(Eip4844Envelope {
            chain_id: 1,
            nonce: 1,
            max_priority_fee_per_gas: 1,
            max_fee_per_gas: 2,
            gas: 21_000,
            to: Some([0x33; 20]),
            value: U256::ZERO,
            data: vec![],
            access_list: vec![],
            max_fee_per_blob_gas: 100,
            blob_versioned_hashes: vec![hash],
        });
        let mut r = [0u8; 32];
        r[31] = 9;
        let sig = Signature { r, s: r, y_parity: 0 };

        let raw = serialize(&tx, Some(&sig));
        assert_eq!(raw[0], 0x03);
        let (back, recovered) = deserialize(&raw).unwrap();
        assert_eq!(back, tx);
        assert_eq!(recovered, Some(sig));
    }

    #[test]
    fn unknown_type_byte_is_rejected() {
        assert!(matches!(
            deserialize(&[0x05, 0xc0]),
            Err(TxError::UnsupportedTransactionType(0x05))
        ));
        assert!(matches!(
            deserialize(&[]),
            Err(TxError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        // A type-2 payload with a 3-item list.
        let payload = RlpItem::list(vec![RlpItem::uint(1), RlpItem::uint(2), RlpItem::uint(3)]);
        let mut raw = vec![0x02];
        raw.extend(encode(&payload));
        assert!(matches!(
            deserialize(&raw),
            Err(TxError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn assertions_gate_signing() {
        let envelope = TypedEnvelope::Eip1559(sample_1559());
        assert!(assert_signable(&envelope, 31_337).is_ok());
        assert!(matches!(
            assert_signable(&envelope, 1),
            Err(TxError::InvalidChainId { expected: 1, .. })
        ));

        let mut tip_heavy = sample_1559();
        tip_heavy.max_priority_fee_per_gas = tip_heavy.max_fee_per_gas + 1;
        assert!(matches!(
            assert_signable(&TypedEnvelope::Eip1559(tip_heavy), 31_337),
            Err(TxError::TransactionTipTooHigh { .. })
        ));
    }

    #[test]
    fn blob_assertions() {
        let mut good_hash = [0u8; 32];
        good_hash[0] = VERSIONED_HASH_VERSION_KZG;
        let base = Eip4844Envelope {
            chain_id: 1,
            nonce: 0,
            max_priority_fee_per_gas: 1,
            max_fee_per_gas: 2,
            gas: 21_000,
            to: Some([0x44; 20]),
            value: U256::ZERO,
            data: vec![],
            access_list: vec![],
            max_fee_per_blob_gas: 1,
            blob_versioned_hashes: vec![good_hash],
        };

        assert!(assert_signable(&TypedEnvelope::Eip4844(base.clone()), 1).is_ok());

        let mut empty = base.clone();
        empty.blob_versioned_hashes.clear();
        assert!(matches!(
            assert_signable(&TypedEnvelope::Eip4844(empty), 1),
            Err(TxError::EmptyBlobs)
        ));

        let mut crowded = base.clone();
        crowded.blob_versioned_hashes = vec![good_hash; 7];
        assert!(matches!(
            assert_signable(&TypedEnvelope::Eip4844(crowded), 1),
            Err(TxError::TooManyBlobs { count: 7, max: 6 })
        ));

        let mut wrong_version = base.clone();
        wrong_version.blob_versioned_hashes = vec![[0x02; 32]];
        assert!(matches!(
            assert_signable(&TypedEnvelope::Eip4844(wrong_version), 1),
            Err(TxError::BlobVersionNotSupported(0x02))
        ));

        let mut create = base;
        create.to = None;
        assert!(matches!(
            assert_signable(&TypedEnvelope::Eip4844(create), 1),
            Err(TxError::CreateBlobTransaction)
        ));
    }
}
