use std::fmt;
use std::ops::Bound;

use rust_decimal::Decimal;
use tracing::instrument;

use crate::column::{ColumnDescriptor, LogicalType};

/// Numeric interval a column can store without clamping.
///
/// A bound which does not fit in a [`Decimal`] is [`Bound::Unbounded`]: no [`Decimal`] value can
/// exceed it anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedRange {
    pub lower: Bound<Decimal>,
    pub upper: Bound<Decimal>,
    pub requires_integer: bool,
}

impl ResolvedRange {
    /// Returns whether the value lies within the bounds. Integrality is not checked.
    pub fn contains(&self, value: &Decimal) -> bool {
        let above_lower = match self.lower {
            Bound::Included(lower) => *value >= lower,
            Bound::Excluded(lower) => *value > lower,
            Bound::Unbounded => true,
        };
        let below_upper = match self.upper {
            Bound::Included(upper) => *value <= upper,
            Bound::Excluded(upper) => *value < upper,
            Bound::Unbounded => true,
        };
        above_lower && below_upper
    }
}

impl fmt::Display for ResolvedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lower {
            Bound::Included(lower) => write!(f, "[{lower}, ")?,
            Bound::Excluded(lower) => write!(f, "({lower}, ")?,
            Bound::Unbounded => write!(f, "(-inf, ")?,
        }
        match self.upper {
            Bound::Included(upper) => write!(f, "{upper}]"),
            Bound::Excluded(upper) => write!(f, "{upper})"),
            Bound::Unbounded => write!(f, "+inf)"),
        }
    }
}

/// Maps a numeric column to its [`ResolvedRange`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RangeResolver;

impl RangeResolver {
    /// Resolves the range of a column; `None` for columns without a derivable range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use column_constraints::prelude::{ColumnDescriptor, RangeResolver, RawColumn};
    /// use rust_decimal::Decimal;
    ///
    /// let column = ColumnDescriptor::from_schema(&RawColumn::new("age", "tinyint")).unwrap();
    /// let range = RangeResolver.resolve(&column).unwrap();
    /// assert_eq!(range.to_string(), "[-128, 128)");
    /// assert!(range.contains(&Decimal::from(127)));
    /// assert!(!range.contains(&Decimal::from(128)));
    /// ```
    #[instrument(name = "resolve::range", level = "trace", skip(self, column), fields(column = column.name()))]
    pub fn resolve(&self, column: &ColumnDescriptor) -> Option<ResolvedRange> {
        if !column.is_numeric() {
            return None;
        }

        match column.logical_type() {
            LogicalType::Decimal => {
                let digits = column.precision()? - column.scale()?;
                let magnitude = power(Decimal::TEN, digits);
                let lower = if column.unsigned() {
                    Bound::Included(Decimal::ZERO)
                } else {
                    negated(magnitude, Bound::Excluded)
                };
                Some(ResolvedRange {
                    lower,
                    upper: excluded(magnitude),
                    requires_integer: false,
                })
            }
            LogicalType::Integer => {
                let width = u32::try_from(column.limit()?).ok().filter(|w| *w > 0)?;
                let bits = width.checked_mul(8)?;
                let (lower, magnitude) = if column.unsigned() {
                    (Bound::Included(Decimal::ZERO), power(Decimal::TWO, bits))
                } else {
                    let magnitude = power(Decimal::TWO, bits - 1);
                    (negated(magnitude, Bound::Included), magnitude)
                };
                Some(ResolvedRange {
                    lower,
                    upper: excluded(magnitude),
                    requires_integer: true,
                })
            }
            _ => None,
        }
    }
}

/// `base^exp`, or `None` when it does not fit in a [`Decimal`].
fn power(base: Decimal, exp: u32) -> Option<Decimal> {
    (0..exp).try_fold(Decimal::ONE, |acc, _| acc.checked_mul(base))
}

fn excluded(magnitude: Option<Decimal>) -> Bound<Decimal> {
    magnitude.map(Bound::Excluded).unwrap_or(Bound::Unbounded)
}

fn negated(magnitude: Option<Decimal>, bound: fn(Decimal) -> Bound<Decimal>) -> Bound<Decimal> {
    magnitude.map(|m| bound(-m)).unwrap_or(Bound::Unbounded)
}
