//! ScalarCodec: leaf encoders/decoders, one per scalar ABI type family.
//!
//! Every entry here produces or consumes exactly one 32-byte slot (the
//! dynamic `bytes`/`string` tail body is assembled in `encode`/`decode`
//! directly, since it isn't a single-slot concept).

use alloy_primitives::{Address, I256, U256};

use crate::error::{AbiError, Result};
use crate::grammar::{AbiType, ScalarFamily};
use crate::value::AbiValue;

/// Encodes a static scalar (everything except dynamic `bytes`/`string`)
/// into its single 32-byte slot.
pub(crate) fn encode_slot(ty: &AbiType, value: &AbiValue, path: &str) -> Result<[u8; 32]> {
    let AbiType::Scalar { family, size } = ty else {
        return Err(AbiError::InternalLayout(format!("encode_slot called on non-scalar type at {path}")));
    };
    match (family, value) {
        (ScalarFamily::Bool, AbiValue::Bool(b)) => {
            let mut out = [0u8; 32];
            out[31] = u8::from(*b);
            Ok(out)
        }
        (ScalarFamily::Address, AbiValue::Address(addr)) => {
            let mut out = [0u8; 32];
            out[12..32].copy_from_slice(addr.as_slice());
            Ok(out)
        }
        (ScalarFamily::Uint, AbiValue::Uint { value, .. }) => {
            if value.bit_len() > *size as usize {
                return Err(AbiError::ValueOutOfRange { ty: ty.canonical(), path: path.to_string() });
            }
            Ok(value.to_be_bytes::<32>())
        }
        (ScalarFamily::Int, AbiValue::Int { value, .. }) => {
            let (min, max) = int_bounds(*size);
            if *value < min || *value > max {
                return Err(AbiError::ValueOutOfRange { ty: ty.canonical(), path: path.to_string() });
            }
            Ok(value.to_be_bytes::<32>())
        }
        (ScalarFamily::FixedBytes, AbiValue::FixedBytes(bytes)) => {
            if bytes.len() != *size as usize {
                return Err(AbiError::ValueOutOfRange { ty: ty.canonical(), path: path.to_string() });
            }
            let mut out = [0u8; 32];
            out[..bytes.len()].copy_from_slice(bytes);
            Ok(out)
        }
        _ => Err(AbiError::TypeIncompatible {
            ty: ty.canonical(),
            path: path.to_string(),
            reason: format!("value kind `{}` does not match type", value.kind_name()),
        }),
    }
}

/// Decodes a static scalar from its single 32-byte slot.
pub(crate) fn decode_slot(ty: &AbiType, word: &[u8; 32], path: &str) -> Result<AbiValue> {
    let AbiType::Scalar { family, size } = ty else {
        return Err(AbiError::InternalLayout(format!("decode_slot called on non-scalar type at {path}")));
    };
    match family {
        ScalarFamily::Bool => Ok(AbiValue::Bool(word[31] != 0)),
        ScalarFamily::Address => Ok(AbiValue::Address(Address::from_slice(&word[12..32]))),
        ScalarFamily::Uint => Ok(AbiValue::Uint { bits: *size, value: U256::from_be_bytes(*word) }),
        ScalarFamily::Int => Ok(AbiValue::Int { bits: *size, value: I256::from_be_bytes(*word) }),
        ScalarFamily::FixedBytes => Ok(AbiValue::FixedBytes(word[..*size as usize].to_vec())),
        ScalarFamily::Bytes | ScalarFamily::String => {
            Err(AbiError::InternalLayout(format!("decode_slot called on dynamic type at {path}")))
        }
    }
}

pub(crate) fn int_bounds(bits: u16) -> (I256, I256) {
    if bits >= 256 {
        return (I256::MIN, I256::MAX);
    }
    let max = (I256::ONE << (bits - 1)) - I256::ONE;
    let min = -(I256::ONE << (bits - 1));
    (min, max)
}
