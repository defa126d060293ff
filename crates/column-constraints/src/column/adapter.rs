//! Translation boundary between the schema representation of the host framework and
//! [`ColumnDescriptor`].
//!
//! Whatever the schema reflection layer hands over only has to implement [`SchemaColumn`]. Column
//! objects which already know whether they hold text, binary or numeric data can say so through
//! the capability hooks; the others get capabilities derived from their SQL type.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::descriptor::{ColumnCapabilities, ColumnDescriptor};
use super::logical_type::{LogicalType, SqlType};
use crate::error::{ConstraintError, ConstraintResult};

/// Precision of a `decimal` declared without arguments.
const DEFAULT_DECIMAL_PRECISION: u32 = 10;

/// A column as exposed by the schema reflection layer.
pub trait SchemaColumn {
    fn name(&self) -> &str;

    /// The raw declared type, e.g. `varchar(40)` or `int(11) unsigned`.
    fn sql_type(&self) -> &str;

    fn nullable(&self) -> bool;

    /// Explicit limit: characters for `char`/`varchar`, bytes for binary and text types,
    /// storage bytes for integers.
    fn limit(&self) -> Option<u64> {
        None
    }

    fn precision(&self) -> Option<u32> {
        None
    }

    fn scale(&self) -> Option<u32> {
        None
    }

    fn collation(&self) -> Option<&str> {
        None
    }

    /// Whether the column holds text; `None` lets the SQL type decide.
    fn is_text(&self) -> Option<bool> {
        None
    }

    /// Whether the column holds binary data; `None` lets the SQL type decide.
    fn is_binary(&self) -> Option<bool> {
        None
    }

    /// Whether the column holds numbers; `None` lets the SQL type decide.
    fn is_numeric(&self) -> Option<bool> {
        None
    }
}

/// Plain column metadata, as read from a schema dump.
///
/// # Example
///
/// ```rust
/// use column_constraints::prelude::{ColumnDescriptor, RawColumn};
///
/// let raw: RawColumn = serde_json::from_str(
///     r#"{ "name": "title", "sql_type": "varchar(40)", "null": false, "collation": "utf8mb4_general_ci" }"#,
/// )
/// .unwrap();
/// let column = ColumnDescriptor::from_schema(&raw).unwrap();
/// assert_eq!(column.limit(), Some(40));
/// assert!(!column.nullable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawColumn {
    pub name: String,
    pub sql_type: String,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
    #[serde(default = "default_null")]
    pub null: bool,
    #[serde(default)]
    pub collation: Option<String>,
}

fn default_null() -> bool {
    true
}

impl RawColumn {
    /// Creates a nullable column without collation.
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            null: true,
            ..Default::default()
        }
    }

    pub fn not_null(mut self) -> Self {
        self.null = false;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    pub fn precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }
}

impl SchemaColumn for RawColumn {
    fn name(&self) -> &str {
        &self.name
    }

    fn sql_type(&self) -> &str {
        &self.sql_type
    }

    fn nullable(&self) -> bool {
        self.null
    }

    fn limit(&self) -> Option<u64> {
        self.limit
    }

    fn precision(&self) -> Option<u32> {
        self.precision
    }

    fn scale(&self) -> Option<u32> {
        self.scale
    }

    fn collation(&self) -> Option<&str> {
        self.collation.as_deref()
    }
}

impl ColumnDescriptor {
    /// Builds a descriptor out of a schema column.
    ///
    /// Fails with [`ConstraintError::InvalidArgument`] when the SQL type cannot be parsed or the
    /// decimal scale exceeds its precision.
    pub fn from_schema<C>(column: &C) -> ConstraintResult<Self>
    where
        C: SchemaColumn + ?Sized,
    {
        let parsed = SqlType::parse(column.sql_type()).inspect_err(|err| {
            warn!(column = column.name(), "cannot describe column: {err}");
        })?;

        let mut descriptor = ColumnDescriptor::new(
            column.name().to_string(),
            column.sql_type().to_string(),
            &parsed,
            column.nullable(),
            column.collation().map(str::to_string),
        );

        let first_arg = parsed.args.first().copied();
        match parsed.logical_type {
            LogicalType::Decimal => {
                let precision = column
                    .precision()
                    .or_else(|| first_arg.and_then(|p| u32::try_from(p).ok()))
                    .unwrap_or(DEFAULT_DECIMAL_PRECISION);
                let scale = column
                    .scale()
                    .or_else(|| parsed.args.get(1).and_then(|s| u32::try_from(*s).ok()))
                    .unwrap_or_default();
                if scale > precision {
                    return Err(ConstraintError::InvalidArgument(format!(
                        "column `{}` declares scale {scale} greater than precision {precision}",
                        column.name()
                    )));
                }
                descriptor.precision = Some(precision);
                descriptor.scale = Some(scale);
            }
            // display width, as in `int(11)`, says nothing about storage
            LogicalType::Integer => {
                descriptor.limit = column.limit().or_else(|| parsed.integer_width());
            }
            LogicalType::Char | LogicalType::Varchar | LogicalType::Binary | LogicalType::Varbinary => {
                descriptor.limit = column.limit().or(first_arg);
            }
            _ => {
                descriptor.limit = column.limit();
            }
        }

        let mut capabilities = descriptor.capabilities;
        for (flag, declared) in [
            (ColumnCapabilities::TEXT, column.is_text()),
            (ColumnCapabilities::BINARY, column.is_binary()),
            (ColumnCapabilities::NUMERIC, column.is_numeric()),
        ] {
            if let Some(declared) = declared {
                capabilities.set(flag, declared);
            }
        }
        descriptor.capabilities = capabilities;

        Ok(descriptor)
    }
}
