use crate::encoding::Encoding;
use crate::error::ConstraintResult;
use crate::prelude::{Validate, ValidationOutcome, Value, Violation};

/// A validator that rejects text containing characters outside the basic multilingual plane.
///
/// Three-byte UTF-8 collations cannot store code points above U+FFFF. Non-text values pass.
///
/// # Example
///
/// ```rust
/// use column_constraints::prelude::{BmpContainmentValidator, Validate, Value};
///
/// assert!(BmpContainmentValidator.validate(&Value::from("ü")).unwrap().is_ok());
/// assert!(!BmpContainmentValidator.validate(&Value::from("\u{1F4A9}")).unwrap().is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BmpContainmentValidator;

impl BmpContainmentValidator {
    fn first_outside(text: &str) -> Option<char> {
        text.chars().find(|c| u32::from(*c) > 0xFFFF)
    }
}

impl Validate for BmpContainmentValidator {
    fn validate(&self, value: &Value) -> ConstraintResult<ValidationOutcome> {
        let character = match value {
            Value::Text(text) => Self::first_outside(text),
            Value::EncodedText(text) if text.encoding() == Encoding::Utf8 => {
                Self::first_outside(&text.decode_lossy())
            }
            _ => None,
        };

        Ok(character
            .map(|character| Violation::OutsideBmp { character })
            .into())
    }
}
