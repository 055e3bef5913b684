use crate::error::CryptoError;
use crate::hash::keccak256;

/// Applies EIP-55 mixed-case checksum encoding to a 20-byte address.
pub fn checksum_address(address: &[u8; 20]) -> String {
    let hex_part = hex::encode(address);

    // EIP-55: hash the lowercase hex address (without 0x).
    let hash = keccak256(hex_part.as_bytes());
    let hash_hex = hex::encode(hash);

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");

    for (i, c) in hex_part.chars().enumerate() {
        if c.is_ascii_digit() {
            checksummed.push(c);
        } else {
            // If the corresponding nibble in the hash is >= 8, uppercase it.
            let hash_nibble = u8::from_str_radix(&hash_hex[i..i + 1], 16).unwrap_or(0);
            if hash_nibble >= 8 {
                checksummed.push(c.to_ascii_uppercase());
            } else {
                checksummed.push(c);
            }
        }
    }

    checksummed
}

/// Parses a 0x-prefixed hex address string into a 20-byte array.
///
/// All-lowercase and all-uppercase inputs are accepted as-is; mixed-case
/// inputs must carry a valid EIP-55 checksum.
pub fn parse_address(address: &str) -> Result<[u8; 20], CryptoError> {
    let hex_str = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| CryptoError::InvalidAddress("address must start with 0x".into()))?;

    if hex_str.len() != 40 {
        return Err(CryptoError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            hex_str.len()
        )));
    }

    let bytes = hex::decode(hex_str)
        .map_err(|e| CryptoError::InvalidAddress(format!("invalid hex: {e}")))?;

    let mut addr = [0u8; 20];
    addr.copy_from_slice(&bytes);

    let is_all_lower = hex_str.chars().all(|c| !c.is_ascii_uppercase());
    let is_all_upper = hex_str.chars().all(|c| !c.is_ascii_lowercase());

    if !is_all_lower && !is_all_upper {
        // Mixed case: verify the EIP-55 checksum.
        let checksummed = checksum_address(&addr);
        if checksummed[2..] != *hex_str {
            return Err(CryptoError::InvalidAddress("EIP-55 checksum mismatch".into()));
        }
    }

    Ok(addr)
}
