//! This module contains the column metadata the constraints are derived from.

mod adapter;
mod descriptor;
mod logical_type;
mod table;

pub use self::adapter::{RawColumn, SchemaColumn};
pub use self::descriptor::{ColumnCapabilities, ColumnDescriptor, ColumnId};
pub use self::logical_type::{LogicalType, SqlType};
pub use self::table::{ColumnProvider, TableDescriptor};
