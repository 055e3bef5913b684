use crate::error::EvmError;

/// Gas charged by MSIZE-class instructions.
pub const QUICK_STEP: u64 = 2;

/// Gas charged by the MLOAD/MSTORE/MSTORE8 instruction class.
pub const FASTEST_STEP: u64 = 3;

/// Tracks gas consumption against a fixed limit.
#[derive(Debug, Clone)]
pub struct GasTracker {
    limit: u64,
    used: u64,
}

impl GasTracker {
    pub fn new(limit: u64) -> Self {
        Self { limit, used: 0 }
    }

    /// Charges `amount` gas, failing with `OutOfGas` when the limit would be
    /// crossed. A rejected charge leaves the tracker unchanged.
    pub fn charge(&mut self, amount: u64) -> Result<(), EvmError> {
        let needed = self.used.checked_add(amount).ok_or(EvmError::Overflow)?;
        if needed > self.limit {
            return Err(EvmError::OutOfGas {
                needed,
                limit: self.limit,
            });
        }
        self.used = needed;
        Ok(())
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    pub fn remaining(&self) -> u64 {
        self.limit - self.used
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

/// Total cost of a memory footprint of `size_bytes`:
/// `3·w + ⌊w²/512⌋` with `w = ceil(size_bytes / 32)`.
///
/// Expansion charges the difference between the new and the current total,
/// so growth is billed exactly once.
pub fn memory_expansion_cost(size_bytes: u64) -> u64 {
    let words = size_bytes.div_ceil(32);
    words
        .saturating_mul(3)
        .saturating_add(words.saturating_mul(words) / 512)
}

/// MCOPY instruction cost before expansion: a VERYLOW base plus three gas
/// per copied word.
pub fn memory_copy_cost(len: u64) -> u64 {
    FASTEST_STEP.saturating_add(len.div_ceil(32).saturating_mul(3))
}
