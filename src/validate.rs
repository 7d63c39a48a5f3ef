//! Validator: a pure predicate layer answering "is this value assignable
//! to this ABI type?", run before encoding for better diagnostics than a
//! raw `TypeIncompatible`/`ValueOutOfRange` from deep inside the encoder.

use crate::error::{extend_path, index_path, AbiError, Result};
use crate::grammar::{AbiType, ArrayLen, ScalarFamily};
use crate::params::Parameters;
use crate::value::AbiValue;

/// Checks `values` against `params`, in order. Does not encode; a
/// successful validation guarantees `encode` will not fail for
/// type-shape reasons (range overflow is still checked at encode time).
pub fn validate(params: &Parameters, values: &[AbiValue]) -> Result<()> {
    if params.len() != values.len() {
        return Err(AbiError::ArityMismatch { expected: params.len(), found: values.len() });
    }
    for (i, (param, value)) in params.0.iter().zip(values.iter()).enumerate() {
        let path = extend_path("", format!("param-{i}({})", param.name));
        is_compatible(&param.ty, value, &path)?;
    }
    Ok(())
}

/// `is_compatible(type, value) -> Result<()>`, recursively.
pub fn is_compatible(ty: &AbiType, value: &AbiValue, path: &str) -> Result<()> {
    match ty {
        AbiType::Scalar { family, size } => match (family, value) {
            (ScalarFamily::Address, AbiValue::Address(_)) => Ok(()),
            (ScalarFamily::Bool, AbiValue::Bool(_)) => Ok(()),
            (ScalarFamily::Uint, AbiValue::Uint { value, .. }) => {
                if value.bit_len() > *size as usize {
                    Err(AbiError::ValueOutOfRange { ty: ty.canonical(), path: path.to_string() })
                } else {
                    Ok(())
                }
            }
            (ScalarFamily::Int, AbiValue::Int { value, .. }) => {
                let (min, max) = crate::scalar::int_bounds(*size);
                if *value < min || *value > max {
                    Err(AbiError::ValueOutOfRange { ty: ty.canonical(), path: path.to_string() })
                } else {
                    Ok(())
                }
            }
            (ScalarFamily::FixedBytes, AbiValue::FixedBytes(bytes)) => {
                if bytes.len() == *size as usize {
                    Ok(())
                } else {
                    Err(AbiError::ValueOutOfRange { ty: ty.canonical(), path: path.to_string() })
                }
            }
            (ScalarFamily::Bytes, AbiValue::Bytes(_)) => Ok(()),
            (ScalarFamily::String, AbiValue::Text(_)) => Ok(()),
            _ => Err(AbiError::TypeIncompatible {
                ty: ty.canonical(),
                path: path.to_string(),
                reason: format!("value kind `{}` does not match type", value.kind_name()),
            }),
        },
        AbiType::Array { inner, len } => {
            let list = value.as_list().ok_or_else(|| AbiError::TypeIncompatible {
                ty: ty.canonical(),
                path: path.to_string(),
                reason: format!("expected a list, found `{}`", value.kind_name()),
            })?;
            if let ArrayLen::Fixed(n) = len {
                if list.len() != *n {
                    return Err(AbiError::ArityMismatch { expected: *n, found: list.len() });
                }
            }
            for (i, el) in list.iter().enumerate() {
                is_compatible(inner, el, &index_path(path, i))?;
            }
            Ok(())
        }
        AbiType::Tuple { components } => {
            let record = value.as_record().ok_or_else(|| AbiError::TypeIncompatible {
                ty: ty.canonical(),
                path: path.to_string(),
                reason: format!("expected a record, found `{}`", value.kind_name()),
            })?;
            if record.len() != components.len() {
                return Err(AbiError::ArityMismatch { expected: components.len(), found: record.len() });
            }
            for (i, ((expected_name, comp_ty), (name, val))) in
                components.iter().zip(record.iter()).enumerate()
            {
                if !expected_name.is_empty() && expected_name != name {
                    return Err(AbiError::NameMismatch {
                        reason: format!("expected field `{expected_name}` at position {i}, found `{name}`"),
                    });
                }
                is_compatible(comp_ty, val, &extend_path(path, name))?;
            }
            Ok(())
        }
    }
}
