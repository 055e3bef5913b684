//! Solidity ABI support for the ethkit toolkit.
//!
//! This crate provides:
//! - The [`ParamType`] parameter model with canonical type strings
//! - Standard head/tail ABI encoding ([`encoder`]) and the non-standard
//!   packed encoding ([`packed`])
//! - A DoS-guarded decoder ([`decoder`])
//! - EIP-712 typed structured-data hashing ([`eip712`])
//! - A seed-deterministic value generator ([`generator`]) for mock replies
//!   and property tests

pub mod decoder;
pub mod eip712;
pub mod encoder;
pub mod error;
pub mod generator;
pub mod item;
pub mod packed;
pub mod param;
pub mod value;

pub use decoder::{decode_parameters, DecodeOptions, DecodedCall};
pub use encoder::{encode_function_call, encode_parameters};
pub use error::AbiError;
pub use item::{AbiParameter, Constructor, CustomError, Function};
pub use packed::encode_packed;
pub use param::ParamType;
pub use value::AbiValue;
