use crate::config::TranscodePolicy;
use crate::encoding::{EncodedText, Encoding};
use crate::error::{ConstraintError, ConstraintResult};
use crate::prelude::{Representation, SizeUnit, Validate, ValidationOutcome, Value, Violation};

/// A validator that checks that a value fits the size of its column, counted either in
/// characters or in bytes of the column encoding.
///
/// # Example
///
/// ```rust
/// use column_constraints::prelude::{SizeUnit, SizeValidator, Validate, Value};
///
/// let validator = SizeValidator::new(100, SizeUnit::Bytes);
/// assert!(validator.validate(&Value::from("ü".repeat(50))).unwrap().is_ok());
/// assert!(!validator.validate(&Value::from("\u{1F4A9}".repeat(26))).unwrap().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SizeValidator {
    pub maximum: u64,
    pub unit: SizeUnit,
    /// Encoding the column stores text in; `None` measures values as given.
    pub encoding: Option<Encoding>,
    pub transcode_policy: TranscodePolicy,
}

impl SizeValidator {
    pub fn new(maximum: u64, unit: SizeUnit) -> Self {
        Self {
            maximum,
            unit,
            encoding: None,
            transcode_policy: TranscodePolicy::default(),
        }
    }

    pub fn with_encoding(mut self, encoding: Option<Encoding>) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_transcode_policy(mut self, transcode_policy: TranscodePolicy) -> Self {
        self.transcode_policy = transcode_policy;
        self
    }

    /// Size of the value in the validator unit; `None` for absent values.
    pub fn measure(&self, value: &Value) -> ConstraintResult<Option<u64>> {
        let Some(repr) = value.representation() else {
            return Ok(None);
        };

        let size = match (self.unit, repr) {
            (SizeUnit::Characters, Representation::Text(text)) => text.chars().count(),
            (SizeUnit::Characters, Representation::Encoded(text)) => character_count(text),
            (SizeUnit::Characters | SizeUnit::Bytes, Representation::Bytes(bytes)) => bytes.len(),
            (SizeUnit::Bytes, Representation::Text(text)) => text.len(),
            (SizeUnit::Bytes, Representation::Encoded(text)) => self.encoded_byte_size(text)?,
        };

        Ok(Some(size as u64))
    }

    fn encoded_byte_size(&self, text: &EncodedText) -> ConstraintResult<usize> {
        match self.encoding {
            Some(target) if target != text.encoding() => match self.transcode_policy {
                TranscodePolicy::Strict => Err(ConstraintError::Transcode {
                    from: text.encoding(),
                    to: target,
                }),
                TranscodePolicy::Lossless => Ok(text.decode()?.len()),
            },
            _ => Ok(text.bytes().len()),
        }
    }
}

fn character_count(text: &EncodedText) -> usize {
    if text.encoding().is_single_byte() {
        text.bytes().len()
    } else {
        text.decode_lossy().chars().count()
    }
}

impl Validate for SizeValidator {
    fn validate(&self, value: &Value) -> ConstraintResult<ValidationOutcome> {
        let Some(count) = self.measure(value)? else {
            return Ok(ValidationOutcome::Ok);
        };

        if count > self.maximum {
            Ok(ValidationOutcome::Failed(Violation::TooLong {
                maximum: self.maximum,
                count,
                unit: self.unit,
            }))
        } else {
            Ok(ValidationOutcome::Ok)
        }
    }
}
