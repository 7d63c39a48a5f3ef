//! Decoder: the exact inverse of the Encoder. Interprets head slots as
//! values or pointers, dereferencing pointers against the anchor of their
//! enclosing dynamic tuple/array (or the buffer start at the top level).
//!
//! `Cursor` mirrors the peek/take-word shape of `alloy-core`'s
//! `coder::Decoder`, adapted to read into this crate's dynamically-typed
//! `AbiValue` tree instead of a const-generic `SolType` token.

use crate::error::{extend_path, index_path, AbiError, Result};
use crate::grammar::{AbiType, ArrayLen, ScalarFamily};
use crate::params::Parameters;
use crate::scalar;
use crate::value::AbiValue;

/// A read-only view over the byte buffer being decoded, with bounds
/// checking centralized in one place.
struct Cursor<'a> {
    buf: &'a [u8],
    /// When set, the padding bytes of a dynamic `bytes`/`string` tail must
    /// be all-zero, mirroring `alloy-core`'s `Decoder::new(buf, validate)`.
    strict: bool,
}

impl<'a> Cursor<'a> {
    fn word_at(&self, offset: usize, path: &str) -> Result<[u8; 32]> {
        let end = offset
            .checked_add(32)
            .ok_or_else(|| AbiError::TruncatedInput { needed: 32, found: 0, path: path.to_string() })?;
        if end > self.buf.len() {
            return Err(AbiError::TruncatedInput {
                needed: end - self.buf.len(),
                found: self.buf.len().saturating_sub(offset),
                path: path.to_string(),
            });
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.buf[offset..end]);
        Ok(out)
    }

    fn slice_at(&self, offset: usize, len: usize, path: &str) -> Result<&'a [u8]> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| AbiError::LengthOverflow { declared: len, remaining: 0, path: path.to_string() })?;
        if end > self.buf.len() {
            return Err(AbiError::LengthOverflow {
                declared: len,
                remaining: self.buf.len().saturating_sub(offset),
                path: path.to_string(),
            });
        }
        Ok(&self.buf[offset..end])
    }

    /// Reads a uint256 at `offset` and narrows it to `usize`, treating an
    /// unrepresentable magnitude the same as an out-of-bounds pointer.
    fn uint_at(&self, offset: usize, path: &str) -> Result<usize> {
        let word = self.word_at(offset, path)?;
        if word[..24].iter().any(|&b| b != 0) {
            return Err(AbiError::LengthOverflow { declared: usize::MAX, remaining: self.buf.len(), path: path.to_string() });
        }
        let mut eight = [0u8; 8];
        eight.copy_from_slice(&word[24..32]);
        Ok(u64::from_be_bytes(eight) as usize)
    }
}

/// Decodes `data` against `params`. The top-level parameter list is
/// treated as an implicit tuple anchored at buffer start.
///
/// Equivalent to [`decode_with_mode`] with `strict = false`.
#[tracing::instrument(level = "trace", skip(data), fields(params = %params.canonical_type()))]
pub fn decode(params: &Parameters, data: &[u8]) -> Result<Vec<(String, AbiValue)>> {
    decode_with_mode(params, data, false)
}

/// Decodes `data` against `params`, as [`decode`], but when `strict` is set
/// additionally rejects non-zero padding bytes in dynamic `bytes`/`string`
/// tails (the all-zero-padding requirement `encode` always produces, but
/// that a lenient decode otherwise ignores on the way in).
#[tracing::instrument(level = "trace", skip(data), fields(params = %params.canonical_type()))]
pub fn decode_with_mode(params: &Parameters, data: &[u8], strict: bool) -> Result<Vec<(String, AbiValue)>> {
    let cursor = Cursor { buf: data, strict };
    let components: Vec<(&str, &AbiType)> = params.0.iter().map(|p| (p.name.as_str(), &p.ty)).collect();
    decode_components(&cursor, &components, 0, "")
}

/// Decodes a sequence of named, heterogeneously-typed components whose
/// head begins at byte offset `base` within `cursor`'s buffer, with `base`
/// itself acting as the anchor for any dynamic component's pointer.
fn decode_components(
    cursor: &Cursor<'_>,
    components: &[(&str, &AbiType)],
    base: usize,
    path: &str,
) -> Result<Vec<(String, AbiValue)>> {
    let mut out = Vec::with_capacity(components.len());
    let mut head_cursor = base;
    for (i, (name, ty)) in components.iter().enumerate() {
        let child_path = if name.is_empty() {
            index_path(path, i)
        } else {
            extend_path(path, format!("param-{i}({name})"))
        };
        if ty.is_dynamic() {
            let rel = cursor.uint_at(head_cursor, &child_path)?;
            let target = base.checked_add(rel).ok_or_else(|| AbiError::BadPointer {
                offset: rel,
                len: cursor.buf.len(),
                path: child_path.clone(),
            })?;
            if target > cursor.buf.len() {
                return Err(AbiError::BadPointer { offset: target, len: cursor.buf.len(), path: child_path });
            }
            let value = decode_value(cursor, ty, target, &child_path)?;
            out.push((name.to_string(), value));
            head_cursor += 32;
        } else {
            let size = ty.byte_size().ok_or_else(|| {
                AbiError::InternalLayout(format!("static type `{}` reports no byte size", ty.canonical()))
            })?;
            if head_cursor + size > cursor.buf.len() {
                return Err(AbiError::TruncatedInput {
                    needed: size,
                    found: cursor.buf.len().saturating_sub(head_cursor),
                    path: child_path.clone(),
                });
            }
            let value = decode_value(cursor, ty, head_cursor, &child_path)?;
            out.push((name.to_string(), value));
            head_cursor += size;
        }
    }
    Ok(out)
}

/// Decodes a value whose own encoding begins at byte offset `at`, whether
/// that's because it's embedded inline in a head (static) or because a
/// pointer was just dereferenced to it (dynamic).
fn decode_value(cursor: &Cursor<'_>, ty: &AbiType, at: usize, path: &str) -> Result<AbiValue> {
    match ty {
        AbiType::Scalar { family: ScalarFamily::Bytes, .. } => decode_bytes_body(cursor, at, path, false),
        AbiType::Scalar { family: ScalarFamily::String, .. } => decode_bytes_body(cursor, at, path, true),
        AbiType::Scalar { .. } => {
            let word = cursor.word_at(at, path)?;
            scalar::decode_slot(ty, &word, path)
        }
        AbiType::Tuple { components } => {
            let named: Vec<(&str, &AbiType)> = components.iter().map(|(n, t)| (n.as_str(), t)).collect();
            let fields = decode_components(cursor, &named, at, path)?;
            Ok(AbiValue::Record(fields))
        }
        AbiType::Array { inner, len } => match len {
            ArrayLen::Fixed(n) => {
                let values = decode_sequence(cursor, inner, *n, at, path)?;
                Ok(AbiValue::List(values))
            }
            ArrayLen::Dynamic => {
                let count = cursor.uint_at(at, path)?;
                let values = decode_sequence(cursor, inner, count, at + 32, path)?;
                Ok(AbiValue::List(values))
            }
        },
    }
}

/// Decodes `count` contiguous elements of `inner`, anchored at `base`.
fn decode_sequence(cursor: &Cursor<'_>, inner: &AbiType, count: usize, base: usize, path: &str) -> Result<Vec<AbiValue>> {
    let anonymous: Vec<(&str, &AbiType)> = std::iter::repeat((inner,)).take(count).map(|(t,)| ("", t)).collect();
    let fields = decode_components(cursor, &anonymous, base, path)?;
    Ok(fields.into_iter().map(|(_, v)| v).collect())
}

fn decode_bytes_body(cursor: &Cursor<'_>, at: usize, path: &str, as_text: bool) -> Result<AbiValue> {
    let len = cursor.uint_at(at, path)?;
    let data = cursor.slice_at(at + 32, len, path)?;
    if cursor.strict {
        let padded_len = len.div_ceil(32) * 32;
        let padding = cursor.slice_at(at + 32 + len, padded_len - len, path)?;
        if padding.iter().any(|&b| b != 0) {
            return Err(AbiError::TypeMismatch {
                path: path.to_string(),
                reason: "non-zero padding in dynamic bytes/string tail".to_string(),
            });
        }
    }
    if as_text {
        let text = std::str::from_utf8(data)
            .map_err(|_| AbiError::InvalidUtf8 { path: path.to_string() })?
            .to_string();
        Ok(AbiValue::Text(text))
    } else {
        Ok(AbiValue::Bytes(alloy_primitives::Bytes::copy_from_slice(data)))
    }
}
