//! Error types returned at the engine's public boundary.

use thiserror::Error;

/// Every failure mode the engine can surface.
///
/// Every variant carries a `path` describing where in the parameter/value
/// tree the failure occurred, of the form `param-<i>(<name>).<field>[<i>]`,
/// so callers can point a user at the offending argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    #[error("invalid type descriptor `{descriptor}`: {reason}")]
    InvalidDescriptor { descriptor: String, reason: String },

    #[error("value incompatible with type `{ty}` at {path}: {reason}")]
    TypeIncompatible { ty: String, path: String, reason: String },

    #[error("value out of range for type `{ty}` at {path}")]
    ValueOutOfRange { ty: String, path: String },

    #[error("expected {expected} values, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("named values do not match parameter names: {reason}")]
    NameMismatch { reason: String },

    #[error("truncated input at {path}: needed {needed} bytes, found {found}")]
    TruncatedInput { needed: usize, found: usize, path: String },

    #[error("pointer at {path} targets offset {offset}, outside buffer of length {len}")]
    BadPointer { offset: usize, len: usize, path: String },

    #[error("declared length {declared} at {path} exceeds {remaining} remaining bytes")]
    LengthOverflow { declared: usize, remaining: usize, path: String },

    #[error("invalid utf-8 at {path}")]
    InvalidUtf8 { path: String },

    #[error("value at {path} cannot be read as the requested host type: {reason}")]
    TypeMismatch { path: String, reason: String },

    #[error("internal layout error: {0}")]
    InternalLayout(String),
}

pub type Result<T> = std::result::Result<T, AbiError>;

/// Builds a child path, e.g. `extend_path("param-0(to)", "inner")` ->
/// `"param-0(to).inner"`.
pub(crate) fn extend_path(parent: &str, child: impl std::fmt::Display) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}.{child}")
    }
}

pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}
