use crate::error::ConstraintResult;
use crate::prelude::{Validate, ValidationOutcome, Value, Violation};

/// A validator that rejects absent values.
///
/// Only [`Value::Null`] fails: empty strings, `false` and zero are values.
///
/// # Example
///
/// ```rust
/// use column_constraints::prelude::{NotNullValidator, Validate, Value};
///
/// assert!(!NotNullValidator.validate(&Value::Null).unwrap().is_ok());
/// assert!(NotNullValidator.validate(&Value::from("")).unwrap().is_ok());
/// assert!(NotNullValidator.validate(&Value::from(false)).unwrap().is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NotNullValidator;

impl Validate for NotNullValidator {
    fn validate(&self, value: &Value) -> ConstraintResult<ValidationOutcome> {
        if value.is_null() {
            Ok(ValidationOutcome::Failed(Violation::MustBeSet))
        } else {
            Ok(ValidationOutcome::Ok)
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_nil() {
        let outcome = NotNullValidator.validate(&Value::Null).unwrap();
        assert_eq!(outcome, ValidationOutcome::Failed(Violation::MustBeSet));
    }

    #[test]
    fn test_blank() {
        assert!(NotNullValidator.validate(&Value::from("")).unwrap().is_ok());
        assert!(NotNullValidator.validate(&Value::from(" ")).unwrap().is_ok());
    }

    #[test]
    fn test_false() {
        assert!(NotNullValidator.validate(&Value::from(false)).unwrap().is_ok());
        assert!(NotNullValidator.validate(&Value::from(0i32)).unwrap().is_ok());
        assert!(NotNullValidator.validate(&Value::Blob(vec![])).unwrap().is_ok());
    }
}
