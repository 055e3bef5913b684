use alloy_primitives::U256;

use crate::error::EvmError;
use crate::gas::{memory_copy_cost, GasTracker, FASTEST_STEP, QUICK_STEP};
use crate::memory::Memory;
use crate::stack::Stack;

/// Execution fork. Ordering is chronological, so feature gates compare with
/// `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Fork {
    London,
    Paris,
    Shanghai,
    Cancun,
}

/// The memory-family opcodes. Operands are popped from the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Pop `offset`; push the 32-byte big-endian word at `offset`.
    MLoad,
    /// Pop `offset`, then `value`; store `value` big-endian at `offset`.
    MStore,
    /// Pop `offset`, then `value`; store the low byte of `value`.
    MStore8,
    /// Push the current memory size in bytes.
    MSize,
    /// Pop `dst`, `src`, `len`; copy with overlap-safe semantics
    /// (EIP-5656, Cancun).
    MCopy,
}

/// A minimal stepping interpreter owning the stack, memory and gas tracker
/// for the duration of execution.
#[derive(Debug)]
pub struct Interpreter {
    pub stack: Stack,
    pub memory: Memory,
    pub gas: GasTracker,
    fork: Fork,
}

impl Interpreter {
    pub fn new(gas_limit: u64, fork: Fork) -> Self {
        Self {
            stack: Stack::new(),
            memory: Memory::new(),
            gas: GasTracker::new(gas_limit),
            fork,
        }
    }

    /// An interpreter whose memory is capped at `memory_limit` bytes.
    pub fn with_memory_limit(gas_limit: u64, fork: Fork, memory_limit: usize) -> Self {
        Self {
            stack: Stack::new(),
            memory: Memory::with_limit(memory_limit),
            gas: GasTracker::new(gas_limit),
            fork,
        }
    }

    pub fn fork(&self) -> Fork {
        self.fork
    }

    /// Executes a single opcode against the interpreter state.
    pub fn execute(&mut self, opcode: Opcode) -> Result<(), EvmError> {
        match opcode {
            Opcode::MLoad => {
                self.gas.charge(FASTEST_STEP)?;
                let offset = self.pop_usize()?;
                let end = offset.checked_add(32).ok_or(EvmError::Overflow)?;
                self.memory.expand(end, &mut self.gas)?;
                let word = self.memory.word_at(offset);
                self.stack.push(word)
            }

            Opcode::MStore => {
                self.gas.charge(FASTEST_STEP)?;
                let offset = self.pop_usize()?;
                let value = self.stack.pop()?;
                let end = offset.checked_add(32).ok_or(EvmError::Overflow)?;
                self.memory.expand(end, &mut self.gas)?;
                self.memory.set_word(offset, value);
                Ok(())
            }

            Opcode::MStore8 => {
                self.gas.charge(FASTEST_STEP)?;
                let offset = self.pop_usize()?;
                let value = self.stack.pop()?;
                let end = offset.checked_add(1).ok_or(EvmError::Overflow)?;
                self.memory.expand(end, &mut self.gas)?;
                self.memory.set_byte(offset, value.to_be_bytes::<32>()[31]);
                Ok(())
            }

            Opcode::MSize => {
                self.gas.charge(QUICK_STEP)?;
                self.stack.push(U256::from(self.memory.len()))
            }

            Opcode::MCopy => {
                if self.fork < Fork::Cancun {
                    return Err(EvmError::InstructionNotEnabled);
                }
                let dst = self.pop_usize()?;
                let src = self.pop_usize()?;
                let len = self.pop_usize()?;
                self.gas.charge(memory_copy_cost(len as u64))?;
                if len > 0 {
                    let end = dst.max(src).checked_add(len).ok_or(EvmError::Overflow)?;
                    self.memory.expand(end, &mut self.gas)?;
                    self.memory.copy(dst, src, len);
                }
                Ok(())
            }
        }
    }

    /// Pops an offset/length operand, rejecting values beyond the host word
    /// size.
    fn pop_usize(&mut self) -> Result<usize, EvmError> {
        let value = self.stack.pop()?;
        usize::try_from(value).map_err(|_| EvmError::Overflow)
    }
}
