use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::logical_type::{LogicalType, SqlType};

static NEXT_COLUMN_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`ColumnDescriptor`].
///
/// Every descriptor built gets a fresh id; clones share it, as they describe the same column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(u64);

impl ColumnId {
    fn next() -> Self {
        Self(NEXT_COLUMN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

bitflags! {
    /// What kind of data a column stores.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ColumnCapabilities: u8 {
        const TEXT = 0b001;
        const BINARY = 0b010;
        const NUMERIC = 0b100;
    }
}

impl From<LogicalType> for ColumnCapabilities {
    fn from(logical_type: LogicalType) -> Self {
        let mut capabilities = Self::empty();
        capabilities.set(Self::TEXT, logical_type.is_text());
        capabilities.set(Self::BINARY, logical_type.is_binary());
        capabilities.set(Self::NUMERIC, logical_type.is_numeric());
        capabilities
    }
}

/// Normalized, immutable view of a single table column's type metadata.
///
/// Descriptors are built through [`crate::prelude::ColumnDescriptor::from_schema`], which parses
/// the SQL type once; nothing downstream looks at the raw type string again.
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    pub(super) id: ColumnId,
    pub(super) name: String,
    pub(super) sql_type: String,
    pub(super) logical_type: LogicalType,
    pub(super) limit: Option<u64>,
    pub(super) precision: Option<u32>,
    pub(super) scale: Option<u32>,
    pub(super) nullable: bool,
    pub(super) unsigned: bool,
    pub(super) collation: Option<String>,
    pub(super) capabilities: ColumnCapabilities,
}

impl ColumnDescriptor {
    pub(super) fn new(
        name: String,
        sql_type: String,
        parsed: &SqlType,
        nullable: bool,
        collation: Option<String>,
    ) -> Self {
        Self {
            id: ColumnId::next(),
            name,
            sql_type,
            logical_type: parsed.logical_type,
            limit: None,
            precision: None,
            scale: None,
            nullable,
            unsigned: parsed.unsigned,
            collation,
            capabilities: parsed.logical_type.into(),
        }
    }

    pub fn id(&self) -> ColumnId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type as declared in the schema, e.g. `decimal(10,2) unsigned`.
    pub fn sql_type(&self) -> &str {
        &self.sql_type
    }

    pub fn logical_type(&self) -> LogicalType {
        self.logical_type
    }

    /// Declared width: characters for `char`/`varchar`, bytes for binary and text types, storage
    /// bytes for integers. Always `None` for decimals.
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn precision(&self) -> Option<u32> {
        self.precision
    }

    pub fn scale(&self) -> Option<u32> {
        self.scale
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn unsigned(&self) -> bool {
        self.unsigned
    }

    pub fn collation(&self) -> Option<&str> {
        self.collation.as_deref()
    }

    pub fn capabilities(&self) -> ColumnCapabilities {
        self.capabilities
    }

    pub fn is_text(&self) -> bool {
        self.capabilities.contains(ColumnCapabilities::TEXT)
    }

    pub fn is_binary(&self) -> bool {
        self.capabilities.contains(ColumnCapabilities::BINARY)
    }

    pub fn is_numeric(&self) -> bool {
        self.capabilities.contains(ColumnCapabilities::NUMERIC)
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_should_derive_capabilities_from_logical_type() {
        assert_eq!(
            ColumnCapabilities::from(LogicalType::Varchar),
            ColumnCapabilities::TEXT
        );
        assert_eq!(
            ColumnCapabilities::from(LogicalType::Mediumblob),
            ColumnCapabilities::BINARY
        );
        assert_eq!(
            ColumnCapabilities::from(LogicalType::Decimal),
            ColumnCapabilities::NUMERIC
        );
        assert!(ColumnCapabilities::from(LogicalType::Other).is_empty());
    }

    #[test]
    fn test_should_assign_distinct_ids() {
        let parsed = SqlType::parse("varchar(10)").unwrap();
        let a = ColumnDescriptor::new("a".into(), "varchar(10)".into(), &parsed, true, None);
        let b = ColumnDescriptor::new("b".into(), "varchar(10)".into(), &parsed, true, None);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }
}
