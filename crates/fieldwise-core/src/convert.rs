//! Conversion capabilities at the data-tree boundary.
//!
//! Three mutually exclusive target-type families, selected by trait bound at
//! compile time (never by runtime type inspection):
//!
//! - [`Scalar`] -- direct conversion from a raw scalar held by the tree
//! - [`FromValue`] -- self-describing construction from a whole value
//! - [`RawBacked`] -- enumerations resolved by decoding a raw tag value
//!
//! The built-in primitive set (`bool`, integers, floats, `String`)
//! implements both `Scalar` and `FromValue`, so a self-describing decode can
//! also consume a bare scalar.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::error::DecodeError;

/// Shape name of a value, used in diagnostics ("expected string, found null").
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Conversion failure at the tree boundary: the located value does not have
/// the shape the target type needs. Path-free; the decoder attaches the
/// field path when it wraps this into a [`DecodeError`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected}, found {found}")]
pub struct Mismatch {
    pub expected: &'static str,
    pub found: &'static str,
}

/// Direct scalar conversion: the target type attempts its own construction
/// from a raw scalar held by the data tree.
pub trait Scalar: Sized {
    /// Shape name this implementation expects, for diagnostics.
    const EXPECTED: &'static str;

    /// Attempt conversion from the located value.
    fn from_scalar(value: &Value) -> Result<Self, Mismatch>;
}

impl Scalar for bool {
    const EXPECTED: &'static str = "bool";

    fn from_scalar(value: &Value) -> Result<Self, Mismatch> {
        value.as_bool().ok_or(Mismatch {
            expected: Self::EXPECTED,
            found: kind(value),
        })
    }
}

impl Scalar for String {
    const EXPECTED: &'static str = "string";

    fn from_scalar(value: &Value) -> Result<Self, Mismatch> {
        value.as_str().map(str::to_owned).ok_or(Mismatch {
            expected: Self::EXPECTED,
            found: kind(value),
        })
    }
}

// Integer conversions narrow from the tree's native width via `try_from`,
// so an out-of-range number fails the same way as a non-number.
macro_rules! signed_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            const EXPECTED: &'static str = stringify!($ty);

            fn from_scalar(value: &Value) -> Result<Self, Mismatch> {
                value
                    .as_i64()
                    .and_then(|n| <$ty>::try_from(n).ok())
                    .ok_or(Mismatch {
                        expected: Self::EXPECTED,
                        found: kind(value),
                    })
            }
        }
    )*};
}

macro_rules! unsigned_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            const EXPECTED: &'static str = stringify!($ty);

            fn from_scalar(value: &Value) -> Result<Self, Mismatch> {
                value
                    .as_u64()
                    .and_then(|n| <$ty>::try_from(n).ok())
                    .ok_or(Mismatch {
                        expected: Self::EXPECTED,
                        found: kind(value),
                    })
            }
        }
    )*};
}

signed_scalar!(i8, i16, i32, i64);
unsigned_scalar!(u8, u16, u32, u64);

impl Scalar for f64 {
    const EXPECTED: &'static str = "f64";

    // `as_f64` widens integer numbers as well.
    fn from_scalar(value: &Value) -> Result<Self, Mismatch> {
        value.as_f64().ok_or(Mismatch {
            expected: Self::EXPECTED,
            found: kind(value),
        })
    }
}

impl Scalar for f32 {
    const EXPECTED: &'static str = "f32";

    fn from_scalar(value: &Value) -> Result<Self, Mismatch> {
        value.as_f64().map(|f| f as f32).ok_or(Mismatch {
            expected: Self::EXPECTED,
            found: kind(value),
        })
    }
}

/// Why a self-describing construction failed: the value itself had the
/// wrong shape, or a nested decode inside the constructor failed.
#[derive(Error, Debug)]
pub enum FromValueError {
    #[error(transparent)]
    Mismatch(#[from] Mismatch),
    #[error(transparent)]
    Decode(Box<DecodeError>),
}

impl From<DecodeError> for FromValueError {
    fn from(err: DecodeError) -> Self {
        FromValueError::Decode(Box::new(err))
    }
}

/// Self-describing construction: the target type knows how to build an
/// instance from a whole data value.
///
/// Composite types implement this by wrapping the value in a
/// [`Decoder`](crate::Decoder) and pulling their own fields; the `?`
/// operator lifts nested decode failures into [`FromValueError`]:
///
/// ```rust
/// use fieldwise_core::{Decoder, FromValue, FromValueError};
/// use serde_json::Value;
///
/// struct Track {
///     title: String,
/// }
///
/// impl FromValue for Track {
///     fn from_value(value: &Value) -> Result<Self, FromValueError> {
///         let dec = Decoder::new(value);
///         Ok(Track {
///             title: dec.scalar("title", &[])?,
///         })
///     }
/// }
/// ```
pub trait FromValue: Sized {
    /// Construct an instance from the whole value.
    fn from_value(value: &Value) -> Result<Self, FromValueError>;
}

// Spelled out per type: a blanket impl over `Scalar` would collide with
// downstream `FromValue` impls under the coherence rules.
macro_rules! scalar_from_value {
    ($($ty:ty),* $(,)?) => {$(
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Result<Self, FromValueError> {
                Ok(<$ty as Scalar>::from_scalar(value)?)
            }
        }
    )*};
}

scalar_from_value!(bool, String, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

/// Raw-value-backed enumeration: each member is tagged with a distinct raw
/// value of some decodable type. Resolution is two-phase: decode the raw
/// value via [`FromValue`], then match it against the members' tags.
pub trait RawBacked: Sized {
    /// The tag type. `Debug` is required so an unmatched raw value can be
    /// named in the failure.
    type Raw: FromValue + fmt::Debug;

    /// Map a decoded raw value to the member tagged with it, or `None` when
    /// no member matches.
    fn from_raw(raw: Self::Raw) -> Option<Self>;
}
