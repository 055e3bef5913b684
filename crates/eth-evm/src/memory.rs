use alloy_primitives::U256;

use crate::error::EvmError;
use crate::gas::{memory_expansion_cost, GasTracker};

/// Byte-addressable interpreter memory.
///
/// The logical size is always a multiple of 32 bytes and only ever grows.
/// Expansion charges the cost delta of the quadratic-plus-linear growth
/// formula against the supplied gas tracker.
#[derive(Debug)]
pub struct Memory {
    data: Vec<u8>,
    limit: usize,
    /// Total expansion cost already charged for the current size.
    charged_cost: u64,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Memory bounded only by the host address space.
    pub fn new() -> Self {
        Self::with_limit(usize::MAX)
    }

    /// Memory with a hard byte limit; expansion past it fails with
    /// `OutOfMemory` before any gas is charged.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            data: Vec::new(),
            limit,
            charged_cost: 0,
        }
    }

    /// Current size in bytes. Invariant: `len() % 32 == 0`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Grows memory so that `[0, end)` is addressable, rounding the new size
    /// up to a word boundary. Shrinking never happens; expanding to a
    /// smaller-or-equal size is free.
    pub fn expand(&mut self, end: usize, gas: &mut GasTracker) -> Result<(), EvmError> {
        if end <= self.data.len() {
            return Ok(());
        }

        let target = end
            .div_ceil(32)
            .checked_mul(32)
            .ok_or(EvmError::Overflow)?;
        if target > self.limit {
            return Err(EvmError::OutOfMemory);
        }

        let new_cost = memory_expansion_cost(target as u64);
        gas.charge(new_cost - self.charged_cost)?;
        self.charged_cost = new_cost;
        self.data.resize(target, 0);
        Ok(())
    }

    /// Reads the 32-byte big-endian word at `offset`. Bytes beyond the
    /// current size read as zero.
    pub fn word_at(&self, offset: usize) -> U256 {
        let mut word = [0u8; 32];
        if offset < self.data.len() {
            let available = (self.data.len() - offset).min(32);
            word[..available].copy_from_slice(&self.data[offset..offset + available]);
        }
        U256::from_be_bytes(word)
    }

    /// Writes `value` big-endian at `offset`. The caller must have expanded
    /// memory to cover `offset + 32`.
    pub fn set_word(&mut self, offset: usize, value: U256) {
        self.data[offset..offset + 32].copy_from_slice(&value.to_be_bytes::<32>());
    }

    /// Writes one byte at `offset`. The caller must have expanded memory to
    /// cover `offset + 1`.
    pub fn set_byte(&mut self, offset: usize, byte: u8) {
        self.data[offset] = byte;
    }

    /// Copies `len` bytes from `src` to `dst` with memmove semantics, so
    /// overlapping regions copy correctly in either direction. The caller
    /// must have expanded memory to cover `max(dst, src) + len`.
    pub fn copy(&mut self, dst: usize, src: usize, len: usize) {
        self.data.copy_within(src..src + len, dst);
    }

    /// Raw view of the backing bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_rounds_to_word_boundary() {
        let mut memory = Memory::new();
        let mut gas = GasTracker::new(1_000);

        memory.expand(1, &mut gas).unwrap();
        assert_eq!(memory.len(), 32);
        memory.expand(33, &mut gas).unwrap();
        assert_eq!(memory.len(), 64);
    }

    #[test]
    fn expansion_is_monotone() {
        let mut memory = Memory::new();
        let mut gas = GasTracker::new(1_000);

        memory.expand(64, &mut gas).unwrap();
        memory.expand(32, &mut gas).unwrap();
        assert_eq!(memory.len(), 64);
    }

    #[test]
    fn expansion_charges_cost_delta() {
        let mut memory = Memory::new();
        let mut gas = GasTracker::new(1_000);

        memory.expand(32, &mut gas).unwrap();
        assert_eq!(gas.used(), 3);
        memory.expand(64, &mut gas).unwrap();
        assert_eq!(gas.used(), 6);
        // Re-expanding to the same size is free.
        memory.expand(64, &mut gas).unwrap();
        assert_eq!(gas.used(), 6);
    }

    #[test]
    fn expansion_without_gas_fails() {
        let mut memory = Memory::new();
        let mut gas = GasTracker::new(2);
        assert!(matches!(
            memory.expand(32, &mut gas),
            Err(EvmError::OutOfGas { .. })
        ));
        assert_eq!(memory.len(), 0);
    }

    #[test]
    fn byte_limit_is_enforced() {
        let mut memory = Memory::with_limit(64);
        let mut gas = GasTracker::new(1_000_000);

        memory.expand(64, &mut gas).unwrap();
        assert_eq!(memory.expand(65, &mut gas), Err(EvmError::OutOfMemory));
        assert_eq!(memory.len(), 64);
    }

    #[test]
    fn word_round_trip() {
        let mut memory = Memory::new();
        let mut gas = GasTracker::new(1_000);
        memory.expand(64, &mut gas).unwrap();

        memory.set_word(32, U256::from(69u64));
        assert_eq!(memory.word_at(32), U256::from(69u64));
        assert_eq!(memory.word_at(0), U256::ZERO);
    }

    #[test]
    fn word_at_reads_zero_beyond_size() {
        let memory = Memory::new();
        assert_eq!(memory.word_at(0), U256::ZERO);
        assert_eq!(memory.word_at(1_000), U256::ZERO);
    }

    #[test]
    fn overlapping_copy_forward_and_backward() {
        let mut memory = Memory::new();
        let mut gas = GasTracker::new(1_000);
        memory.expand(64, &mut gas).unwrap();

        for i in 0..16 {
            memory.set_byte(i, i as u8);
        }
        // dst > src with overlap: the original source bytes must land intact.
        memory.copy(8, 0, 16);
        let expected: Vec<u8> = (0..16).collect();
        assert_eq!(&memory.bytes()[8..24], expected.as_slice());
        assert_eq!(&memory.bytes()[..8], &expected[..8]);

        // dst < src with overlap.
        memory.copy(0, 8, 16);
        assert_eq!(&memory.bytes()[..16], expected.as_slice());
    }
}
