//! Encoder: walks a (type, value) pair, producing a flat byte buffer in
//! EVM head/tail form.
//!
//! The recursion always returns a self-contained [`SlotBuffer`] for the
//! value being encoded, anchored at its own slot `0`. A parent embeds a
//! static child directly (`extend`); a dynamic child is embedded via a
//! pointer slot in the head plus the child's buffer appended to the tail.
//! Because `SlotBuffer::extend` rebases a relocated buffer's internal
//! pointers by the same amount for both `target` and `anchor`, a dynamic
//! array's element pointers stay correctly anchored to the array's own
//! first element slot (not the count slot) purely as a consequence of
//! this rebasing — no special-casing needed at the call site.

use crate::error::{extend_path, index_path, AbiError, Result};
use crate::grammar::{AbiType, ArrayLen};
use crate::params::Parameters;
use crate::scalar;
use crate::slot::SlotBuffer;
use crate::value::AbiValue;

/// Encodes `values` against `params`, returning the flat ABI byte buffer.
/// The top-level parameter list is treated as an implicit tuple.
#[tracing::instrument(level = "trace", skip(values), fields(params = %params.canonical_type()))]
pub fn encode(params: &Parameters, values: &[AbiValue]) -> Result<Vec<u8>> {
    if params.len() != values.len() {
        return Err(AbiError::ArityMismatch { expected: params.len(), found: values.len() });
    }
    let components: Vec<(&AbiType, &AbiValue)> =
        params.0.iter().map(|p| &p.ty).zip(values.iter()).collect();
    let names: Vec<&str> = params.0.iter().map(|p| p.name.as_str()).collect();
    let buf = encode_heads_and_tails(&components, &names, "")?;
    Ok(buf.finalize())
}

/// Encodes a named value map against `params`. Keys must match parameter
/// names, in order.
pub fn encode_named(params: &Parameters, values: &[(String, AbiValue)]) -> Result<Vec<u8>> {
    if params.len() != values.len() {
        return Err(AbiError::ArityMismatch { expected: params.len(), found: values.len() });
    }
    for (param, (key, _)) in params.0.iter().zip(values.iter()) {
        if &param.name != key {
            return Err(AbiError::NameMismatch {
                reason: format!("expected `{}` at position {}, found `{key}`", param.name, param.position),
            });
        }
    }
    let ordered: Vec<AbiValue> = values.iter().map(|(_, v)| v.clone()).collect();
    encode(params, &ordered)
}

/// Encodes a single `(type, value)` pair in isolation, the way a reference
/// type's event-topic preimage is computed (`selector::encode_for_topic`).
pub(crate) fn encode_single(ty: &AbiType, value: &AbiValue, path: &str) -> Result<Vec<u8>> {
    Ok(encode_value(ty, value, path)?.finalize())
}

/// Builds the head/tail layout for an ordered set of named components,
/// anchored at this buffer's own slot 0. Used for: the top-level parameter
/// list, any tuple, and (via the caller prefixing a count slot) the
/// element list of a dynamic array.
fn encode_heads_and_tails(
    components: &[(&AbiType, &AbiValue)],
    names: &[&str],
    path: &str,
) -> Result<SlotBuffer> {
    let mut buf = SlotBuffer::new();
    let mut pending_tails = Vec::new();

    for (i, (ty, value)) in components.iter().enumerate() {
        let child_path = if names.is_empty() {
            index_path(path, i)
        } else {
            extend_path(path, format!("param-{i}({})", names[i]))
        };
        if ty.is_dynamic() {
            let placeholder = buf.push_raw([0u8; 32]);
            let tail = encode_value(ty, value, &child_path)?;
            pending_tails.push((placeholder, tail));
        } else {
            let direct = encode_value(ty, value, &child_path)?;
            buf.extend(direct);
        }
    }

    for (placeholder, tail) in pending_tails {
        let target = buf.extend(tail);
        buf.set_pointer(placeholder, target, crate::slot::SlotIndex(0));
    }
    Ok(buf)
}

/// Encodes a single value as a self-contained buffer anchored at its own
/// slot 0 — suitable either for direct embedding (if static) or for
/// appending to a tail (if dynamic).
fn encode_value(ty: &AbiType, value: &AbiValue, path: &str) -> Result<SlotBuffer> {
    match ty {
        AbiType::Scalar { family, .. }
            if matches!(family, crate::grammar::ScalarFamily::Bytes | crate::grammar::ScalarFamily::String) =>
        {
            encode_bytes_like(ty, value, path)
        }
        AbiType::Scalar { .. } => {
            let mut buf = SlotBuffer::new();
            buf.push_raw(scalar::encode_slot(ty, value, path)?);
            Ok(buf)
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
            let (names, pairs): (Vec<&str>, Vec<(&AbiType, &AbiValue)>) = itertools::izip!(
                components.iter().map(|(n, t)| (n.as_str(), t)),
                record.iter().map(|(_, v)| v)
            )
            .map(|((name, ty), value)| (name, (ty, value)))
            .unzip();
            encode_heads_and_tails(&pairs, &names, path)
        }
        AbiType::Array { inner, len } => encode_array(inner, *len, value, path),
    }
}

fn encode_array(inner: &AbiType, len: ArrayLen, value: &AbiValue, path: &str) -> Result<SlotBuffer> {
    let list = value.as_list().ok_or_else(|| AbiError::TypeIncompatible {
        ty: format!("{}[]", inner.canonical()),
        path: path.to_string(),
        reason: format!("expected a list, found `{}`", value.kind_name()),
    })?;

    if let ArrayLen::Fixed(n) = len {
        if list.len() != n {
            return Err(AbiError::ArityMismatch { expected: n, found: list.len() });
        }
    }

    let elements = if inner.is_dynamic() {
        let pairs: Vec<(&AbiType, &AbiValue)> = list.iter().map(|v| (inner, v)).collect();
        let names: Vec<&str> = Vec::new();
        encode_heads_and_tails(&pairs, &names, path)?
    } else {
        let mut buf = SlotBuffer::new();
        for (i, el) in list.iter().enumerate() {
            buf.extend(encode_value(inner, el, &index_path(path, i))?);
        }
        buf
    };

    match len {
        ArrayLen::Fixed(_) => Ok(elements),
        ArrayLen::Dynamic => {
            let mut buf = SlotBuffer::new();
            let mut count_word = [0u8; 32];
            count_word[24..32].copy_from_slice(&(list.len() as u64).to_be_bytes());
            buf.push_raw(count_word);
            buf.extend(elements);
            Ok(buf)
        }
    }
}

fn encode_bytes_like(ty: &AbiType, value: &AbiValue, path: &str) -> Result<SlotBuffer> {
    let data: Vec<u8> = match (ty, value) {
        (AbiType::Scalar { family: crate::grammar::ScalarFamily::Bytes, .. }, AbiValue::Bytes(b)) => {
            b.to_vec()
        }
        (AbiType::Scalar { family: crate::grammar::ScalarFamily::String, .. }, AbiValue::Text(s)) => {
            s.as_bytes().to_vec()
        }
        _ => {
            return Err(AbiError::TypeIncompatible {
                ty: ty.canonical(),
                path: path.to_string(),
                reason: format!("value kind `{}` does not match type", value.kind_name()),
            })
        }
    };

    let mut buf = SlotBuffer::new();
    let mut len_word = [0u8; 32];
    len_word[24..32].copy_from_slice(&(data.len() as u64).to_be_bytes());
    buf.push_raw(len_word);

    let mut offset = 0;
    while offset < data.len() {
        let end = (offset + 32).min(data.len());
        let mut chunk = [0u8; 32];
        chunk[..end - offset].copy_from_slice(&data[offset..end]);
        buf.push_raw(chunk);
        offset = end;
    }
    Ok(buf)
}
