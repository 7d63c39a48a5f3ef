//! ValueTree: the in-memory representation of decoded values, and the
//! input to the encoder.

use alloy_primitives::{Address, Bytes, I256, U256};

/// A decoded or to-be-encoded ABI value. Mirrors `AbiType`'s shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Bool(bool),
    /// `bits` echoes the declared width; the magnitude itself is always
    /// carried in a full 256-bit `U256`.
    Uint { bits: u16, value: U256 },
    Int { bits: u16, value: I256 },
    Address(Address),
    /// `N` fixed bytes, unpadded (length == the declared `bytesN` size).
    FixedBytes(Vec<u8>),
    Bytes(Bytes),
    Text(String),
    List(Vec<AbiValue>),
    /// Insertion-ordered `name -> value` pairs, mirroring a tuple's
    /// component order.
    Record(Vec<(String, AbiValue)>),
}

impl AbiValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            AbiValue::Bool(_) => "bool",
            AbiValue::Uint { .. } => "uint",
            AbiValue::Int { .. } => "int",
            AbiValue::Address(_) => "address",
            AbiValue::FixedBytes(_) => "fixed-bytes",
            AbiValue::Bytes(_) => "bytes",
            AbiValue::Text(_) => "text",
            AbiValue::List(_) => "list",
            AbiValue::Record(_) => "record",
        }
    }

    pub fn as_list(&self) -> Option<&[AbiValue]> {
        match self {
            AbiValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&[(String, AbiValue)]> {
        match self {
            AbiValue::Record(v) => Some(v),
            _ => None,
        }
    }
}
