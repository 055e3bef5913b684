use alloy_primitives::{I256, U256};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::param::ParamType;
use crate::value::AbiValue;

/// Size bounds for generated collections and payloads.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    /// Upper bound (inclusive) on generated array lengths.
    pub max_collection_len: usize,
    /// Upper bound (inclusive) on generated `string`/`bytes` payload lengths.
    pub max_payload_len: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_collection_len: 4,
            max_payload_len: 64,
        }
    }
}

/// Seed-deterministic generator of values conforming to a declared
/// [`ParamType`]. The same seed always yields the same value tree, which
/// makes it suitable for mock RPC replies and reproducible property tests.
pub struct ValueGenerator {
    rng: StdRng,
    config: GeneratorConfig,
}

impl ValueGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self::with_config(seed, GeneratorConfig::default())
    }

    pub fn with_config(seed: u64, config: GeneratorConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    /// Produces a value conforming to `ty`. Numeric values are masked to the
    /// declared bit width, so generated trees always encode cleanly.
    pub fn generate(&mut self, ty: &ParamType) -> AbiValue {
        match ty {
            ParamType::Address => AbiValue::Address(self.rng.gen()),
            ParamType::Bool => AbiValue::Bool(self.rng.gen()),

            ParamType::String => {
                let len = self.rng.gen_range(0..=self.config.max_payload_len);
                let text: String = (0..len)
                    .map(|_| self.rng.sample(Alphanumeric) as char)
                    .collect();
                AbiValue::String(text)
            }

            ParamType::Bytes => {
                let len = self.rng.gen_range(0..=self.config.max_payload_len);
                AbiValue::Bytes(self.byte_run(len))
            }

            ParamType::FixedBytes(size) => AbiValue::FixedBytes(self.byte_run(*size)),

            ParamType::Uint(bits) => AbiValue::Uint(self.uint_in_width(*bits)),

            ParamType::Int(bits) => {
                // Draw the low `bits` at random, then sign-extend so the raw
                // word is a valid intN.
                let low = self.uint_in_width(*bits);
                let raw = if *bits < 256 && low.bit(bits - 1) {
                    low | U256::MAX << *bits
                } else {
                    low
                };
                AbiValue::Int(I256::from_raw(raw))
            }

            ParamType::Array(element) => {
                let len = self.rng.gen_range(0..=self.config.max_collection_len);
                AbiValue::Array((0..len).map(|_| self.generate(element)).collect())
            }

            ParamType::FixedArray(element, size) => {
                AbiValue::FixedArray((0..*size).map(|_| self.generate(element)).collect())
            }

            ParamType::Tuple(components) => AbiValue::Tuple(
                components
                    .iter()
                    .map(|component| self.generate(component))
                    .collect(),
            ),
        }
    }

    /// Generates one value per declared type, in order.
    pub fn generate_many(&mut self, types: &[ParamType]) -> Vec<AbiValue> {
        types.iter().map(|ty| self.generate(ty)).collect()
    }

    fn byte_run(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| self.rng.gen()).collect()
    }

    fn uint_in_width(&mut self, bits: usize) -> U256 {
        let word: [u8; 32] = self.rng.gen();
        let value = U256::from_be_bytes(word);
        if bits == 256 {
            value
        } else {
            value >> (256 - bits)
        }
    }
}
