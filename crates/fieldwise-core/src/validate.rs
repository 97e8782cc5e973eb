//! Validation boundary: composable predicates over typed values.
//!
//! Only the interface the decoder consumes lives here; rule composition and
//! the individual rule library are external concerns. A collection of
//! validators is satisfied only if every member is satisfied.

use thiserror::Error;

/// A rejected value's reason, surfaced verbatim in decode failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct ValidationError {
    reason: String,
}

impl ValidationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A named predicate over a typed value.
pub trait Validator<T: ?Sized> {
    fn validate(&self, value: &T) -> Result<(), ValidationError>;
}

/// Ad hoc predicates: any matching closure is a validator.
impl<T: ?Sized, F> Validator<T> for F
where
    F: Fn(&T) -> Result<(), ValidationError>,
{
    fn validate(&self, value: &T) -> Result<(), ValidationError> {
        self(value)
    }
}

/// Conjunction over a validator list: runs in supplied order, all must
/// pass, the first failure wins.
pub fn validate_all<T: ?Sized>(
    value: &T,
    validators: &[&dyn Validator<T>],
) -> Result<(), ValidationError> {
    for validator in validators {
        validator.validate(value)?;
    }
    Ok(())
}
