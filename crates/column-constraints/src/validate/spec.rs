use crate::constraint::ConstraintKind;
use crate::error::ConstraintResult;
use crate::prelude::{
    BmpContainmentValidator, NotNullValidator, NumericRangeValidator, SizeValidator, Validate,
    ValidationOutcome, Value,
};

/// A validator derived for a column, one per enabled constraint kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorSpec {
    NotNull(NotNullValidator),
    Size(SizeValidator),
    BmpContainment(BmpContainmentValidator),
    Range(NumericRangeValidator),
}

impl ValidatorSpec {
    /// The constraint kind this validator enforces.
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Self::NotNull(_) => ConstraintKind::NotNull,
            Self::Size(_) => ConstraintKind::Size,
            Self::BmpContainment(_) => ConstraintKind::BmpContainment,
            Self::Range(_) => ConstraintKind::Range,
        }
    }
}

impl Validate for ValidatorSpec {
    fn validate(&self, value: &Value) -> ConstraintResult<ValidationOutcome> {
        match self {
            Self::NotNull(validator) => validator.validate(value),
            Self::Size(validator) => validator.validate(value),
            Self::BmpContainment(validator) => validator.validate(value),
            Self::Range(validator) => validator.validate(value),
        }
    }
}

impl From<NotNullValidator> for ValidatorSpec {
    fn from(validator: NotNullValidator) -> Self {
        Self::NotNull(validator)
    }
}

impl From<SizeValidator> for ValidatorSpec {
    fn from(validator: SizeValidator) -> Self {
        Self::Size(validator)
    }
}

impl From<BmpContainmentValidator> for ValidatorSpec {
    fn from(validator: BmpContainmentValidator) -> Self {
        Self::BmpContainment(validator)
    }
}

impl From<NumericRangeValidator> for ValidatorSpec {
    fn from(validator: NumericRangeValidator) -> Self {
        Self::Range(validator)
    }
}
