//! The decode-and-coerce engine: typed field extraction over one value tree.
//!
//! A [`Decoder`] borrows a single `serde_json::Value` for the lifetime of a
//! decode session and exposes the extraction matrix: required and optional
//! cardinalities, scalar and sequence arities, across the three conversion
//! strategies ([`Scalar`], [`FromValue`], [`RawBacked`]). Every call is an
//! independent lookup, convert, validate pipeline; the decoder keeps no
//! state between calls.
//!
//! # Key design decisions
//!
//! - **One level of lookup**: a field path names a direct child of the
//!   wrapped value. Nested objects are decoded by the child type's
//!   `FromValue` impl constructing its own `Decoder` over the child value.
//! - **All-or-nothing vs filtering sequences**: primitive-strategy sequence
//!   decodes fail on the first unconvertible element; self-describing and
//!   raw-enum sequence decodes drop unconvertible elements and keep the
//!   survivors in original order. Dropped counts go to the `tracing` debug
//!   channel.
//! - **Opaque optionals**: the `opt_*` family never returns an error. Any
//!   failure (absence, conversion, not-a-sequence) collapses to `None`; the
//!   swallowed error is logged at debug level before it disappears.
//! - **Validators on required primitive and self-describing paths only**:
//!   the raw-enum and optional paths run none.

use serde_json::Value;
use tracing::debug;

use crate::convert::{kind, FromValue, RawBacked, Scalar};
use crate::error::{DecodeError, Result, Strategy, UnwrapOfAbsent};
use crate::validate::{validate_all, Validator};

/// Wraps one borrowed data value and exposes the typed extraction
/// operations.
///
/// Construction never fails; an absent or malformed root is only detected
/// when a field is requested (a `null` root has no children, so every
/// lookup on it reports absence).
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    value: &'a Value,
}

impl<'a> Decoder<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// The wrapped value.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Child lookup by key. `None` means absent; a key holding `null` is
    /// present and yields `Some(&Value::Null)`.
    fn lookup(&self, key: &str) -> Option<&'a Value> {
        self.value.get(key)
    }

    fn require(&self, key: &str) -> Result<&'a Value> {
        self.lookup(key)
            .ok_or_else(|| DecodeError::FieldMissing { key: key.to_owned() })
    }

    /// Locate `key` and expose its ordered children.
    fn require_seq(&self, key: &str) -> Result<&'a [Value]> {
        let located = self.require(key)?;
        if !located.is_array() {
            return Err(DecodeError::NotASequence {
                key: key.to_owned(),
                found: kind(located),
            });
        }
        // `is_array` above proved the shape; `as_array` cannot miss.
        Ok(unwrap_present(located.as_array())?.as_slice())
    }

    // ------------------------------------------------------------------
    // Required scalars
    // ------------------------------------------------------------------

    /// Required scalar, primitive strategy: the field must be present,
    /// directly convertible, and pass every validator. Pass `&[]` for no
    /// validation.
    pub fn scalar<T: Scalar>(&self, key: &str, validators: &[&dyn Validator<T>]) -> Result<T> {
        let located = self.require(key)?;
        let value =
            T::from_scalar(located).map_err(|err| conversion(key, Strategy::Primitive, err))?;
        check(key, &value, validators)?;
        Ok(value)
    }

    /// Required scalar, self-describing strategy: the field's value (object,
    /// array, or bare scalar) is handed whole to `T::from_value`.
    ///
    /// Absence of the field is reported distinctly from the value existing
    /// but failing its own construction.
    pub fn nested<T: FromValue>(&self, key: &str, validators: &[&dyn Validator<T>]) -> Result<T> {
        let located = self.require(key)?;
        let value = T::from_value(located)
            .map_err(|err| conversion(key, Strategy::SelfDescribing, err))?;
        check(key, &value, validators)?;
        Ok(value)
    }

    /// Required scalar, raw-enum strategy. Two phases with distinct failure
    /// modes: the raw value failing to decode is a conversion failure, a
    /// decoded raw value matching no member is
    /// [`NoEnumMember`](DecodeError::NoEnumMember).
    // TODO: decide whether the raw-enum path should accept validators like
    // the other required paths; today it does not.
    pub fn raw_enum<T: RawBacked>(&self, key: &str) -> Result<T> {
        let located = self.require(key)?;
        let raw = T::Raw::from_value(located)
            .map_err(|err| conversion(key, Strategy::RawValue, err))?;
        let rendered = format!("{raw:?}");
        T::from_raw(raw).ok_or(DecodeError::NoEnumMember {
            key: key.to_owned(),
            raw: rendered,
        })
    }

    // ------------------------------------------------------------------
    // Required sequences
    // ------------------------------------------------------------------

    /// Required sequence, primitive strategy: all-or-nothing. Any element
    /// failing conversion fails the whole extraction.
    pub fn scalar_seq<T: Scalar>(
        &self,
        key: &str,
        validators: &[&dyn Validator<Vec<T>>],
    ) -> Result<Vec<T>> {
        let items = self.require_seq(key)?;
        let values = items
            .iter()
            .map(|item| {
                T::from_scalar(item).map_err(|err| conversion(key, Strategy::Primitive, err))
            })
            .collect::<Result<Vec<T>>>()?;
        check(key, &values, validators)?;
        Ok(values)
    }

    /// Required sequence, self-describing strategy: filtering. Elements that
    /// fail conversion are dropped; survivors keep their original order.
    pub fn nested_seq<T: FromValue>(
        &self,
        key: &str,
        validators: &[&dyn Validator<Vec<T>>],
    ) -> Result<Vec<T>> {
        let items = self.require_seq(key)?;
        let values = filtered(key, items, |item| T::from_value(item).ok());
        check(key, &values, validators)?;
        Ok(values)
    }

    /// Required sequence, raw-enum strategy: filtering, like
    /// [`nested_seq`](Self::nested_seq). An element is dropped when its raw
    /// value fails to decode or matches no member.
    pub fn raw_enum_seq<T: RawBacked>(&self, key: &str) -> Result<Vec<T>> {
        let items = self.require_seq(key)?;
        Ok(filtered(key, items, |item| {
            T::Raw::from_value(item).ok().and_then(T::from_raw)
        }))
    }

    // ------------------------------------------------------------------
    // Optional scalars
    // ------------------------------------------------------------------

    /// Optional scalar, primitive strategy. Absence, a present `null`, or a
    /// conversion failure all collapse to `None`.
    pub fn opt_scalar<T: Scalar>(&self, key: &str) -> Option<T> {
        collapse(key, self.scalar(key, &[]))
    }

    /// Optional scalar, self-describing strategy.
    pub fn opt_nested<T: FromValue>(&self, key: &str) -> Option<T> {
        collapse(key, self.nested(key, &[]))
    }

    /// Optional scalar, raw-enum strategy.
    pub fn opt_raw_enum<T: RawBacked>(&self, key: &str) -> Option<T> {
        collapse(key, self.raw_enum(key))
    }

    // ------------------------------------------------------------------
    // Optional sequences
    // ------------------------------------------------------------------

    /// Optional sequence, primitive strategy: all-or-nothing, collapsed.
    /// One unconvertible element makes the whole extraction `None`.
    pub fn opt_scalar_seq<T: Scalar>(&self, key: &str) -> Option<Vec<T>> {
        collapse(key, self.scalar_seq(key, &[]))
    }

    /// Optional sequence, self-describing strategy: filtering. Only a
    /// missing field or a non-sequence value produces `None`; unconvertible
    /// elements are dropped from the `Some` result.
    pub fn opt_nested_seq<T: FromValue>(&self, key: &str) -> Option<Vec<T>> {
        collapse(key, self.nested_seq(key, &[]))
    }

    /// Optional sequence, raw-enum strategy: filtering, collapsed.
    pub fn opt_raw_enum_seq<T: RawBacked>(&self, key: &str) -> Option<Vec<T>> {
        collapse(key, self.raw_enum_seq(key))
    }
}

/// Convert each child independently, dropping the ones that fail. Emits the
/// dropped count on the debug channel.
fn filtered<T>(key: &str, items: &[Value], convert: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    let mut kept = Vec::with_capacity(items.len());
    let mut dropped = 0usize;
    for item in items {
        match convert(item) {
            Some(value) => kept.push(value),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(
            key,
            dropped,
            kept = kept.len(),
            "dropped unconvertible sequence elements"
        );
    }
    kept
}

/// Error-to-optional collapsing for the `opt_*` family. The public contract
/// is opaque about why a value was unavailable; the swallowed error goes to
/// the debug channel for implementers who need visibility.
fn collapse<T>(key: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(key, error = %err, "optional extraction collapsed to none");
            None
        }
    }
}

fn conversion(key: &str, strategy: Strategy, detail: impl std::fmt::Display) -> DecodeError {
    DecodeError::Conversion {
        key: key.to_owned(),
        strategy,
        detail: detail.to_string(),
    }
}

fn check<T: ?Sized>(key: &str, value: &T, validators: &[&dyn Validator<T>]) -> Result<()> {
    validate_all(value, validators).map_err(|err| DecodeError::Validation {
        key: key.to_owned(),
        reason: err.reason().to_owned(),
    })
}

/// Fallible stand-in for `Option::unwrap` on values already proven present.
/// Failing here is a decoder defect, never bad input.
fn unwrap_present<T>(option: Option<T>) -> std::result::Result<T, UnwrapOfAbsent> {
    option.ok_or(UnwrapOfAbsent)
}
