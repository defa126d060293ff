use std::collections::BTreeMap;
use std::sync::Arc;

use super::adapter::{RawColumn, SchemaColumn};
use super::descriptor::ColumnDescriptor;
use crate::error::{ConstraintError, ConstraintResult};

/// Supplies the column descriptors of one table (or model class).
pub trait ColumnProvider {
    /// Name of the table, used to key cached validators.
    ///
    /// A [`crate::prelude::ConstraintValidatorFactory`] assumes that providers sharing a name
    /// describe the same columns: use one factory per schema when names may collide.
    fn table_name(&self) -> &str;

    /// Looks up the column backing an attribute.
    fn column(&self, attribute: &str) -> Option<&Arc<ColumnDescriptor>>;

    /// Same as [`ColumnProvider::column`], failing with [`ConstraintError::UnknownColumn`].
    fn require_column(&self, attribute: &str) -> ConstraintResult<&Arc<ColumnDescriptor>> {
        self.column(attribute)
            .ok_or_else(|| ConstraintError::UnknownColumn {
                table: self.table_name().to_string(),
                column: attribute.to_string(),
            })
    }
}

/// The columns of a table, keyed by attribute name.
#[derive(Debug, Clone)]
pub struct TableDescriptor {
    name: String,
    columns: BTreeMap<String, Arc<ColumnDescriptor>>,
}

impl TableDescriptor {
    /// Describes a table out of its schema columns.
    pub fn new<C>(name: impl Into<String>, columns: &[C]) -> ConstraintResult<Self>
    where
        C: SchemaColumn,
    {
        let name = name.into();
        let mut described = BTreeMap::new();
        for column in columns {
            let descriptor = ColumnDescriptor::from_schema(column)?;
            if described
                .insert(descriptor.name().to_string(), Arc::new(descriptor))
                .is_some()
            {
                return Err(ConstraintError::InvalidArgument(format!(
                    "table `{name}` declares column `{}` twice",
                    column.name()
                )));
            }
        }

        Ok(Self {
            name,
            columns: described,
        })
    }

    /// Describes a table out of a JSON array of [`RawColumn`]s.
    pub fn from_json(name: impl Into<String>, json: &str) -> ConstraintResult<Self> {
        let columns: Vec<RawColumn> = serde_json::from_str(json)
            .map_err(|err| ConstraintError::Config(format!("invalid column list: {err}")))?;
        Self::new(name, &columns)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> impl Iterator<Item = &Arc<ColumnDescriptor>> {
        self.columns.values()
    }
}

impl ColumnProvider for TableDescriptor {
    fn table_name(&self) -> &str {
        &self.name
    }

    fn column(&self, attribute: &str) -> Option<&Arc<ColumnDescriptor>> {
        self.columns.get(attribute)
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_should_load_table_from_json() {
        let table = TableDescriptor::from_json(
            "foos",
            r#"[
                { "name": "string", "sql_type": "varchar(40)" },
                { "name": "checked", "sql_type": "int(11)", "null": false }
            ]"#,
        )
        .unwrap();

        assert_eq!(table.name(), "foos");
        assert_eq!(table.columns().count(), 2);
        assert!(!table.column("checked").unwrap().nullable());
    }

    #[test]
    fn test_should_fail_on_unknown_column() {
        let table = TableDescriptor::new("foos", &[RawColumn::new("string", "varchar(40)")]).unwrap();
        assert_eq!(
            table.require_column("missing").unwrap_err(),
            ConstraintError::UnknownColumn {
                table: "foos".to_string(),
                column: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_should_reject_duplicated_columns() {
        let result = TableDescriptor::new(
            "foos",
            &[
                RawColumn::new("string", "varchar(40)"),
                RawColumn::new("string", "text"),
            ],
        );
        assert!(matches!(result, Err(ConstraintError::InvalidArgument(_))));
    }

    #[test]
    fn test_should_report_malformed_json_as_config_error() {
        let result = TableDescriptor::from_json("foos", "{ not json");
        assert!(matches!(result, Err(ConstraintError::Config(_))));
    }
}
