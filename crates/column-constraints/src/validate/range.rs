use crate::error::ConstraintResult;
use crate::prelude::{ResolvedRange, Validate, ValidationOutcome, Value, Violation};

/// A validator that checks a value against the numeric range of its column.
///
/// Integer columns also reject fractional values. Values with no numeric interpretation, such as
/// booleans, blobs and non-numeric text, are reported as [`Violation::NotANumber`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericRangeValidator {
    pub range: ResolvedRange,
    pub allow_null: bool,
}

impl NumericRangeValidator {
    pub fn new(range: ResolvedRange) -> Self {
        Self {
            range,
            allow_null: true,
        }
    }
}

impl Validate for NumericRangeValidator {
    fn validate(&self, value: &Value) -> ConstraintResult<ValidationOutcome> {
        if value.is_null() {
            if self.allow_null {
                return Ok(ValidationOutcome::Ok);
            }
            return Ok(ValidationOutcome::Failed(Violation::NotANumber));
        }

        let Some(number) = value.to_decimal() else {
            return Ok(ValidationOutcome::Failed(Violation::NotANumber));
        };

        if self.range.requires_integer && !number.fract().is_zero() {
            return Ok(ValidationOutcome::Failed(Violation::NotAnInteger {
                value: number,
            }));
        }

        if !self.range.contains(&number) {
            return Ok(ValidationOutcome::Failed(Violation::OutOfRange {
                value: number,
                range: self.range,
            }));
        }

        Ok(ValidationOutcome::Ok)
    }
}

#[cfg(test)]
mod tests {

    use std::ops::Bound;

    use rust_decimal::Decimal;

    use super::*;

    fn tinyint() -> NumericRangeValidator {
        NumericRangeValidator::new(ResolvedRange {
            lower: Bound::Included(Decimal::from(-128)),
            upper: Bound::Excluded(Decimal::from(128)),
            requires_integer: true,
        })
    }

    fn decimal_10_2() -> NumericRangeValidator {
        NumericRangeValidator::new(ResolvedRange {
            lower: Bound::Excluded(Decimal::from(-100_000_000)),
            upper: Bound::Excluded(Decimal::from(100_000_000)),
            requires_integer: false,
        })
    }

    #[test]
    fn test_should_accept_values_within_range() {
        let validator = tinyint();
        for value in [
            Value::from(-128i32),
            Value::from(0u8),
            Value::from(127i64),
            Value::from("42"),
            Value::from(Decimal::from(12)),
        ] {
            assert!(validator.validate(&value).unwrap().is_ok(), "{value:?}");
        }
    }

    #[test]
    fn test_should_reject_values_outside_range() {
        let validator = tinyint();
        let outcome = validator.validate(&Value::from(128i32)).unwrap();
        assert_eq!(
            outcome.violation().unwrap().to_string(),
            "must be within [-128, 128)"
        );
        assert!(!validator.validate(&Value::from(-129i32)).unwrap().is_ok());
    }

    #[test]
    fn test_should_reject_fractions_for_integers() {
        let outcome = tinyint()
            .validate(&Value::from(Decimal::new(15, 1)))
            .unwrap();
        assert_eq!(
            outcome,
            ValidationOutcome::Failed(Violation::NotAnInteger {
                value: Decimal::new(15, 1)
            })
        );
    }

    #[test]
    fn test_should_report_integrality_before_range() {
        let outcome = tinyint().validate(&Value::from("300.5")).unwrap();
        assert!(matches!(
            outcome.violation(),
            Some(Violation::NotAnInteger { .. })
        ));
    }

    #[test]
    fn test_should_exclude_decimal_bounds() {
        let validator = decimal_10_2();
        assert!(
            validator
                .validate(&Value::from(Decimal::new(9_999_999_999, 2)))
                .unwrap()
                .is_ok()
        );
        assert!(
            !validator
                .validate(&Value::from(100_000_000u32))
                .unwrap()
                .is_ok()
        );
        assert!(
            !validator
                .validate(&Value::from(-100_000_000i32))
                .unwrap()
                .is_ok()
        );
    }

    #[test]
    fn test_should_reject_non_numbers() {
        let validator = tinyint();
        for value in [
            Value::from("abc"),
            Value::from(true),
            Value::Blob(vec![1]),
        ] {
            assert_eq!(
                validator.validate(&value).unwrap(),
                ValidationOutcome::Failed(Violation::NotANumber),
                "{value:?}"
            );
        }
    }

    #[test]
    fn test_should_honour_allow_null() {
        let mut validator = tinyint();
        assert!(validator.validate(&Value::Null).unwrap().is_ok());
        validator.allow_null = false;
        assert_eq!(
            validator.validate(&Value::Null).unwrap(),
            ValidationOutcome::Failed(Violation::NotANumber)
        );
    }
}
