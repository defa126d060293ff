//! This module contains the [`ColumnTruncator`], which shrinks values down to the size of their
//! column instead of rejecting them.

use tracing::debug;

use crate::column::ColumnDescriptor;
use crate::config::TranscodePolicy;
use crate::encoding::{EncodedText, Encoding};
use crate::error::ConstraintResult;
use crate::resolve::{SizeLimitResolver, SizeUnit};
use crate::validate::SizeValidator;
use crate::value::Value;

/// Shrinks values to the size limit of one column.
///
/// Values are measured the way the size validator of the column measures them, and returned
/// untouched when they fit. Oversized values of byte-limited columns are transcoded to the column
/// encoding first, replacing undecodable bytes. Text is then cut on a character boundary, so that
/// the result never holds half of a multi-byte character: a byte limit falling inside a character
/// drops the whole character.
///
/// A value is left untouched exactly when it passes the size validator built with the same
/// [`TranscodePolicy`].
///
/// # Example
///
/// ```rust
/// use column_constraints::prelude::{
///     ColumnDescriptor, ColumnTruncator, RawColumn, SizeLimitResolver, Value,
/// };
///
/// let column = ColumnDescriptor::from_schema(
///     &RawColumn::new("tinytext", "tinytext").collation("utf8mb3_general_ci"),
/// )
/// .unwrap();
/// let truncator = ColumnTruncator::new(&column, &SizeLimitResolver::default()).unwrap();
///
/// // the limit falls between the two bytes of the last character
/// let value = truncator.truncate(Value::from("ü".repeat(128)));
/// assert_eq!(value, Value::from("ü".repeat(127)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTruncator {
    column: String,
    measure: Option<SizeValidator>,
}

impl ColumnTruncator {
    /// Builds the truncator of a column.
    ///
    /// Fails with [`crate::prelude::ConstraintError::UnsupportedEncoding`] if the column encoding
    /// cannot be resolved.
    pub fn new(column: &ColumnDescriptor, resolver: &SizeLimitResolver) -> ConstraintResult<Self> {
        let limit = resolver.resolve(column)?;
        let measure = limit
            .enforceable()
            .map(|(maximum, unit)| SizeValidator::new(maximum, unit).with_encoding(limit.encoding));

        Ok(Self {
            column: column.name().to_string(),
            measure,
        })
    }

    /// Measures foreign-encoded text like a size validator with the given policy.
    pub fn with_transcode_policy(mut self, transcode_policy: TranscodePolicy) -> Self {
        self.measure = self
            .measure
            .map(|measure| measure.with_transcode_policy(transcode_policy));
        self
    }

    /// The maximum size and its unit, if the column has one.
    pub fn limit(&self) -> Option<(u64, SizeUnit)> {
        self.measure
            .as_ref()
            .map(|measure| (measure.maximum, measure.unit))
    }

    /// Shrinks the value to the column limit. Never fails; [`Value::Null`] is returned as is.
    pub fn truncate(&self, value: Value) -> Value {
        let Some(measure) = &self.measure else {
            return value;
        };

        match measure.measure(&value) {
            Ok(Some(size)) if size > measure.maximum => {}
            Ok(_) => return value,
            // encoding refused by the transcode policy
            Err(_) => {}
        }

        let value = match measure.unit {
            SizeUnit::Bytes => transcode(value, measure.encoding),
            SizeUnit::Characters => value,
        };
        let size = match measure.measure(&value) {
            Ok(Some(size)) if size > measure.maximum => size,
            Ok(_) | Err(_) => return value,
        };

        debug!(
            column = %self.column,
            size,
            maximum = measure.maximum,
            unit = %measure.unit,
            "truncating value"
        );
        let maximum = usize::try_from(measure.maximum).unwrap_or(usize::MAX);
        shorten(value, maximum, measure.unit)
    }
}

/// Converts text in a foreign encoding to the column encoding.
fn transcode(value: Value, encoding: Option<Encoding>) -> Value {
    match (value, encoding) {
        (Value::EncodedText(text), Some(Encoding::Utf8)) if text.encoding() != Encoding::Utf8 => {
            Value::Text(text.decode_lossy())
        }
        (value, _) => value,
    }
}

fn shorten(value: Value, maximum: usize, unit: SizeUnit) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Blob(mut bytes) => {
            bytes.truncate(maximum);
            Value::Blob(bytes)
        }
        Value::Text(text) => Value::Text(shorten_text(text, maximum, unit)),
        Value::EncodedText(text) if text.encoding().is_single_byte() => {
            let bytes = &text.bytes()[..maximum.min(text.bytes().len())];
            Value::EncodedText(EncodedText::new(text.encoding(), bytes))
        }
        Value::EncodedText(text) => {
            let shortened = shorten_text(text.decode_lossy(), maximum, unit);
            Value::EncodedText(EncodedText::new(Encoding::Utf8, shortened.into_bytes()))
        }
        scalar => Value::Text(shorten_text(scalar.to_string(), maximum, unit)),
    }
}

fn shorten_text(mut text: String, maximum: usize, unit: SizeUnit) -> String {
    let cut = match unit {
        SizeUnit::Characters => text
            .char_indices()
            .nth(maximum)
            .map(|(offset, _)| offset)
            .unwrap_or(text.len()),
        SizeUnit::Bytes => {
            let mut cut = maximum.min(text.len());
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            cut
        }
    };
    text.truncate(cut);
    text
}
