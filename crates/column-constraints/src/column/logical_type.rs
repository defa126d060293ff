use lazy_regex::{Lazy, Regex, lazy_regex};
use serde::{Deserialize, Serialize};

use crate::error::{ConstraintError, ConstraintResult};

/// `base(args) modifiers`, e.g. `decimal(10, 2) unsigned zerofill`.
static SQL_TYPE: Lazy<Regex> =
    lazy_regex!(r"^\s*([A-Za-z][A-Za-z0-9_]*)\s*(?:\(([^)]*)\))?\s*(.*?)\s*$");

/// Closed set of column kinds this crate can derive constraints for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalType {
    Char,
    Varchar,
    Binary,
    Varbinary,
    Tinytext,
    Text,
    Mediumtext,
    Longtext,
    Tinyblob,
    Blob,
    Mediumblob,
    Longblob,
    Decimal,
    Integer,
    Other,
}

impl LogicalType {
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::Char | Self::Varchar | Self::Tinytext | Self::Text | Self::Mediumtext | Self::Longtext
        )
    }

    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            Self::Binary
                | Self::Varbinary
                | Self::Tinyblob
                | Self::Blob
                | Self::Mediumblob
                | Self::Longblob
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Decimal | Self::Integer)
    }
}

/// A declared SQL type, parsed once when the column descriptor is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlType {
    pub logical_type: LogicalType,
    /// Lowercased base type name, e.g. `mediumint`.
    pub base: String,
    /// Parenthesized arguments, e.g. `[10, 2]` for `decimal(10,2)`.
    pub args: Vec<u64>,
    pub unsigned: bool,
}

impl SqlType {
    /// Parses a raw SQL type declaration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use column_constraints::prelude::{LogicalType, SqlType};
    ///
    /// let sql_type = SqlType::parse("decimal(10, 2) unsigned").unwrap();
    /// assert_eq!(sql_type.logical_type, LogicalType::Decimal);
    /// assert_eq!(sql_type.args, vec![10, 2]);
    /// assert!(sql_type.unsigned);
    /// ```
    pub fn parse(sql_type: &str) -> ConstraintResult<Self> {
        let invalid = || ConstraintError::InvalidArgument(format!("malformed SQL type `{sql_type}`"));
        let captures = SQL_TYPE.captures(sql_type).ok_or_else(invalid)?;

        let base = captures
            .get(1)
            .map(|m| m.as_str().to_ascii_lowercase())
            .ok_or_else(invalid)?;
        let args = match captures.get(2) {
            Some(args) => args
                .as_str()
                .split(',')
                .map(|arg| arg.trim().parse::<u64>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| invalid())?,
            None => Vec::new(),
        };
        let unsigned = captures
            .get(3)
            .map(|m| {
                m.as_str()
                    .split_whitespace()
                    .any(|modifier| modifier.eq_ignore_ascii_case("unsigned"))
            })
            .unwrap_or_default();

        Ok(Self {
            logical_type: logical_type_of(&base),
            base,
            args,
            unsigned,
        })
    }

    /// Storage width in bytes of an integer type.
    pub fn integer_width(&self) -> Option<u64> {
        match self.base.as_str() {
            "tinyint" => Some(1),
            "smallint" => Some(2),
            "mediumint" => Some(3),
            "int" | "integer" => Some(4),
            "bigint" => Some(8),
            _ => None,
        }
    }
}

fn logical_type_of(base: &str) -> LogicalType {
    match base {
        "char" | "character" => LogicalType::Char,
        "varchar" => LogicalType::Varchar,
        "binary" => LogicalType::Binary,
        "varbinary" => LogicalType::Varbinary,
        "tinytext" => LogicalType::Tinytext,
        "text" => LogicalType::Text,
        "mediumtext" => LogicalType::Mediumtext,
        "longtext" => LogicalType::Longtext,
        "tinyblob" => LogicalType::Tinyblob,
        "blob" => LogicalType::Blob,
        "mediumblob" => LogicalType::Mediumblob,
        "longblob" => LogicalType::Longblob,
        "decimal" | "numeric" | "dec" | "fixed" => LogicalType::Decimal,
        "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" => {
            LogicalType::Integer
        }
        _ => LogicalType::Other,
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_should_parse_varchar() {
        let sql_type = SqlType::parse("varchar(40)").unwrap();
        assert_eq!(sql_type.logical_type, LogicalType::Varchar);
        assert_eq!(sql_type.base, "varchar");
        assert_eq!(sql_type.args, vec![40]);
        assert!(!sql_type.unsigned);
    }

    #[test]
    fn test_should_parse_unsigned_modifiers() {
        let sql_type = SqlType::parse("TINYINT UNSIGNED").unwrap();
        assert_eq!(sql_type.logical_type, LogicalType::Integer);
        assert!(sql_type.unsigned);
        assert_eq!(sql_type.integer_width(), Some(1));

        let sql_type = SqlType::parse("bigint(20) unsigned zerofill").unwrap();
        assert!(sql_type.unsigned);
        assert_eq!(sql_type.args, vec![20]);
        assert_eq!(sql_type.integer_width(), Some(8));
    }

    #[test]
    fn test_should_parse_decimal_with_spaces() {
        let sql_type = SqlType::parse("DECIMAL(5, 3) UNSIGNED").unwrap();
        assert_eq!(sql_type.logical_type, LogicalType::Decimal);
        assert_eq!(sql_type.args, vec![5, 3]);
        assert!(sql_type.unsigned);
    }

    #[test]
    fn test_should_map_text_and_blob_families() {
        for (raw, expected) in [
            ("tinytext", LogicalType::Tinytext),
            ("TEXT", LogicalType::Text),
            ("mediumtext", LogicalType::Mediumtext),
            ("longtext", LogicalType::Longtext),
            ("tinyblob", LogicalType::Tinyblob),
            ("blob", LogicalType::Blob),
            ("mediumblob", LogicalType::Mediumblob),
            ("longblob", LogicalType::Longblob),
            ("varbinary(255)", LogicalType::Varbinary),
            ("datetime", LogicalType::Other),
            ("float", LogicalType::Other),
        ] {
            assert_eq!(SqlType::parse(raw).unwrap().logical_type, expected, "{raw}");
        }
    }

    #[test]
    fn test_should_reject_malformed_types() {
        assert!(SqlType::parse("").is_err());
        assert!(SqlType::parse("varchar(abc)").is_err());
        assert!(SqlType::parse("(10)").is_err());
    }

    #[test]
    fn test_capabilities() {
        assert!(LogicalType::Varchar.is_text());
        assert!(!LogicalType::Varchar.is_binary());
        assert!(LogicalType::Blob.is_binary());
        assert!(LogicalType::Integer.is_numeric());
        assert!(!LogicalType::Other.is_numeric());
        assert!(!LogicalType::Other.is_text());
    }
}
