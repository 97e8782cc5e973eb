//! Error types for field extraction operations.

use std::fmt;

use thiserror::Error;

/// Which conversion strategy was in effect when a conversion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Direct scalar conversion ([`Scalar`](crate::convert::Scalar)).
    Primitive,
    /// Construction from a whole data value ([`FromValue`](crate::convert::FromValue)).
    SelfDescribing,
    /// Raw-value decode feeding an enumeration ([`RawBacked`](crate::convert::RawBacked)).
    RawValue,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Primitive => "primitive",
            Strategy::SelfDescribing => "self-describing",
            Strategy::RawValue => "raw-value",
        };
        f.write_str(name)
    }
}

/// Invariant violation inside the decoder: a value that was proven present
/// was absent when force-unwrapped.
///
/// This indicates a defect in this crate, not bad input. It is kept as its
/// own type so the programming-error class stays distinct from the
/// data-error variants of [`DecodeError`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unwrap of absent value (decoder invariant violated)")]
pub struct UnwrapOfAbsent;

/// Errors raised by required extraction operations.
///
/// Optional operations never surface these; they collapse every failure to
/// `None` and report the swallowed error on the `tracing` debug channel.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// A required field path did not resolve to any value. A key holding
    /// `null` is present, not missing.
    #[error("missing field `{key}`")]
    FieldMissing { key: String },

    /// A value was located but could not be converted to the target type.
    #[error("field `{key}`: {strategy} conversion failed: {detail}")]
    Conversion {
        key: String,
        strategy: Strategy,
        detail: String,
    },

    /// Sequence extraction was requested but the located value is not an
    /// ordered collection.
    #[error("field `{key}`: expected a sequence, found {found}")]
    NotASequence { key: String, found: &'static str },

    /// The raw value decoded successfully but no enumeration member is
    /// tagged with it.
    #[error("field `{key}`: no enum member for raw value {raw}")]
    NoEnumMember { key: String, raw: String },

    /// A successfully converted value was rejected by one of its validators.
    #[error("field `{key}`: validation failed: {reason}")]
    Validation { key: String, reason: String },

    /// See [`UnwrapOfAbsent`].
    #[error(transparent)]
    Invariant(#[from] UnwrapOfAbsent),
}

/// Convenience alias used throughout fieldwise-core.
pub type Result<T> = std::result::Result<T, DecodeError>;
