//! Ethereum contract ABI type grammar, value encoding and decoding.
//!
//! This crate implements the Solidity/Ethereum contract ABI's type/value
//! layer: parsing and canonicalizing type descriptors (`uint256[2][]`,
//! `(address,uint256)`), encoding a tree of values into the EVM's 32-byte
//! head/tail wire format, decoding the inverse, and validating a value tree
//! against a type before encoding it. Function selectors and event topics
//! build on the same pieces.
//!
//! Keccak-256 is never computed by this crate — every function that needs
//! a hash (`selector`, `event_topic0`, `encode_for_topic`) takes one in as
//! `impl Fn(&[u8]) -> [u8; 32]`, so callers plug in whatever hashing crate
//! they already depend on.
//!
//! ```
//! use sol_abi::{decode, encode, AbiValue, Parameters};
//! use alloy_primitives::{Address, U256};
//!
//! let params = Parameters::parse("(address to, uint256 amount)").unwrap();
//! let values = vec![
//!     AbiValue::Address(Address::ZERO),
//!     AbiValue::Uint { bits: 256, value: U256::from(1_000u64) },
//! ];
//! let bytes = encode(&params, &values).unwrap();
//! let decoded = decode(&params, &bytes).unwrap();
//! assert_eq!(decoded[1].1, values[1]);
//! ```

mod decode;
mod encode;
mod error;
mod grammar;
mod params;
mod scalar;
mod selector;
mod slot;
mod validate;
mod value;

pub use decode::{decode, decode_with_mode};
pub use encode::{encode, encode_named};
pub use error::{AbiError, Result};
pub use grammar::{AbiType, ArrayLen, ScalarFamily};
pub use params::{Param, Parameters};
pub use selector::{canonical_signature, encode_for_topic, event_topic0, selector};
pub use validate::{is_compatible, validate};
pub use value::AbiValue;

/// Parses a `(named-type, ...)` descriptor into an ordered [`Parameters`]
/// list. Thin free-function wrapper over [`Parameters::parse`], named to
/// match the logical API surface callers expect alongside `encode`/`decode`.
pub fn parse_parameters(descriptor: &str) -> Result<Parameters> {
    Parameters::parse(descriptor)
}
