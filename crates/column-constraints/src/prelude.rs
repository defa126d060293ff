//! Prelude exposes all the types for `column-constraints` crate.

pub use crate::column::{
    ColumnCapabilities, ColumnDescriptor, ColumnId, ColumnProvider, LogicalType, RawColumn,
    SchemaColumn, SqlType, TableDescriptor,
};
pub use crate::config::{ConstraintsConfig, SizePolicy, TranscodePolicy};
pub use crate::constraint::{ConstraintKind, ConstraintSet};
pub use crate::encoding::{EncodedText, Encoding, is_three_byte_utf8_collation};
pub use crate::error::{ConstraintError, ConstraintResult};
pub use crate::factory::ConstraintValidatorFactory;
pub use crate::record::{Attributes, DatabaseConstraints, Record, TruncationHook, ValidationErrors};
pub use crate::resolve::{
    RangeResolver, ResolvedRange, ResolvedSizeLimit, SizeLimitResolver, SizeUnit,
};
pub use crate::truncate::ColumnTruncator;
pub use crate::validate::{
    BmpContainmentValidator, NotNullValidator, NumericRangeValidator, SizeValidator, Validate,
    ValidationOutcome, ValidatorSpec, Violation, ViolationKind,
};
pub use crate::value::{Representation, Value};
