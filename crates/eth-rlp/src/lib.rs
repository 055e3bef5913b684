//! Recursive-length-prefix (RLP) codec.
//!
//! This crate provides:
//! - An [`RlpItem`] tree over nested byte strings
//! - A canonical encoder (`encode`)
//! - A strict decoder (`decode`) that rejects non-minimal length forms,
//!   truncated input and trailing bytes
//! - Minimal-big-endian integer helpers used by the transaction serializer

pub mod decode;
pub mod encode;
pub mod error;
pub mod item;

pub use decode::decode;
pub use encode::encode;
pub use error::RlpError;
pub use item::RlpItem;
