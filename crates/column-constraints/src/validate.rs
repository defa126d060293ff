//! This module contains the validators derived from column constraints.
//!
//! Each validator takes a [`Value`] and returns a [`ValidationOutcome`]. A failed outcome is not an
//! error: it carries the [`Violation`] for the record layer to collect. Errors are reserved for
//! values which cannot be examined at all, such as text which would need a lossy transcoding.

mod bmp;
mod not_null;
mod range;
mod size;
mod spec;
mod violation;

pub use self::bmp::BmpContainmentValidator;
pub use self::not_null::NotNullValidator;
pub use self::range::NumericRangeValidator;
pub use self::size::SizeValidator;
pub use self::spec::ValidatorSpec;
pub use self::violation::{Violation, ViolationKind};
use crate::error::ConstraintResult;
use crate::value::Value;

/// Result of checking one value against one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Ok,
    Failed(Violation),
}

impl ValidationOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Ok => None,
            Self::Failed(violation) => Some(violation),
        }
    }

    pub fn into_violation(self) -> Option<Violation> {
        match self {
            Self::Ok => None,
            Self::Failed(violation) => Some(violation),
        }
    }
}

impl From<Option<Violation>> for ValidationOutcome {
    fn from(violation: Option<Violation>) -> Self {
        violation.map(Self::Failed).unwrap_or(Self::Ok)
    }
}

/// Trait for validating [`Value`]s against a single column rule.
pub trait Validate {
    /// Validates the given [`Value`].
    ///
    /// Validators are stateless: the same instance can check any number of values.
    fn validate(&self, value: &Value) -> ConstraintResult<ValidationOutcome>;
}
