use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::resolve::{ResolvedRange, SizeUnit};

/// Kind of a [`Violation`], without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MustBeSet,
    TooLong,
    OutOfRange,
    NotAnInteger,
    NotANumber,
    OutsideBmp,
}

/// A value which would not survive being written to its column.
///
/// The [`fmt::Display`] implementation renders a default English message; callers wanting other
/// wordings can match on the variant and use its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The column is `NOT NULL` and no value is set.
    MustBeSet,
    /// The value is longer than the column.
    TooLong {
        maximum: u64,
        count: u64,
        unit: SizeUnit,
    },
    /// The value lies outside the column range.
    OutOfRange { value: Decimal, range: ResolvedRange },
    /// The column only stores integers.
    NotAnInteger { value: Decimal },
    /// The value has no numeric interpretation.
    NotANumber,
    /// The column cannot store characters beyond U+FFFF.
    OutsideBmp { character: char },
}

impl Violation {
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::MustBeSet => ViolationKind::MustBeSet,
            Self::TooLong { .. } => ViolationKind::TooLong,
            Self::OutOfRange { .. } => ViolationKind::OutOfRange,
            Self::NotAnInteger { .. } => ViolationKind::NotAnInteger,
            Self::NotANumber => ViolationKind::NotANumber,
            Self::OutsideBmp { .. } => ViolationKind::OutsideBmp,
        }
    }

    /// Message key, suitable for looking up translations.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::MustBeSet => "must_be_set",
            Self::TooLong {
                unit: SizeUnit::Characters,
                ..
            } => "too_long",
            Self::TooLong {
                unit: SizeUnit::Bytes,
                ..
            } => "too_many_bytes",
            Self::OutOfRange { .. } => "out_of_range",
            Self::NotAnInteger { .. } => "not_an_integer",
            Self::NotANumber => "not_a_number",
            Self::OutsideBmp { .. } => "characters_outside_basic_multilingual_plane",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MustBeSet => write!(f, "must be set"),
            Self::TooLong { maximum, unit, .. } => {
                write!(f, "is too long (maximum is {maximum} {unit})")
            }
            Self::OutOfRange { range, .. } => write!(f, "must be within {range}"),
            Self::NotAnInteger { .. } => write!(f, "must be an integer"),
            Self::NotANumber => write!(f, "is not a number"),
            Self::OutsideBmp { .. } => write!(
                f,
                "contains characters outside Unicode's basic multilingual plane"
            ),
        }
    }
}
