#![crate_name = "column_constraints"]
#![crate_type = "lib"]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Column Constraints
//!
//! This crate derives, out of the metadata of MySQL columns, the rules a value must satisfy to be
//! written to its column without being silently truncated or clamped, and enforces them before
//! the write happens. Values can either be rejected, through validators, or shrunk to fit,
//! through truncators.
//!
//! You can import all the useful types and traits by using the prelude module:
//!
//! ```rust
//! use column_constraints::prelude::*;
//! ```
//!
//! ## Types
//!
//! ### Column
//!
//! - [`ColumnCapabilities`](crate::prelude::ColumnCapabilities)
//! - [`ColumnDescriptor`](crate::prelude::ColumnDescriptor)
//! - [`ColumnId`](crate::prelude::ColumnId)
//! - [`ColumnProvider`](crate::prelude::ColumnProvider)
//! - [`LogicalType`](crate::prelude::LogicalType)
//! - [`RawColumn`](crate::prelude::RawColumn)
//! - [`SchemaColumn`](crate::prelude::SchemaColumn)
//! - [`SqlType`](crate::prelude::SqlType)
//! - [`TableDescriptor`](crate::prelude::TableDescriptor)
//!
//! ### Constraints
//!
//! - [`ConstraintKind`](crate::prelude::ConstraintKind)
//! - [`ConstraintSet`](crate::prelude::ConstraintSet)
//! - [`ConstraintValidatorFactory`](crate::prelude::ConstraintValidatorFactory)
//! - [`ConstraintsConfig`](crate::prelude::ConstraintsConfig)
//! - [`SizePolicy`](crate::prelude::SizePolicy)
//! - [`TranscodePolicy`](crate::prelude::TranscodePolicy)
//!
//! ### Encoding
//!
//! - [`EncodedText`](crate::prelude::EncodedText)
//! - [`Encoding`](crate::prelude::Encoding)
//!
//! ### Resolve
//!
//! - [`RangeResolver`](crate::prelude::RangeResolver)
//! - [`ResolvedRange`](crate::prelude::ResolvedRange)
//! - [`ResolvedSizeLimit`](crate::prelude::ResolvedSizeLimit)
//! - [`SizeLimitResolver`](crate::prelude::SizeLimitResolver)
//! - [`SizeUnit`](crate::prelude::SizeUnit)
//!
//! ### Validate
//!
//! - [`Validate`](crate::prelude::Validate)
//! - [`BmpContainmentValidator`](crate::prelude::BmpContainmentValidator)
//! - [`NotNullValidator`](crate::prelude::NotNullValidator)
//! - [`NumericRangeValidator`](crate::prelude::NumericRangeValidator)
//! - [`SizeValidator`](crate::prelude::SizeValidator)
//! - [`ValidationOutcome`](crate::prelude::ValidationOutcome)
//! - [`ValidatorSpec`](crate::prelude::ValidatorSpec)
//! - [`Violation`](crate::prelude::Violation)
//! - [`ViolationKind`](crate::prelude::ViolationKind)
//!
//! ### Truncate
//!
//! - [`ColumnTruncator`](crate::prelude::ColumnTruncator)
//!
//! ### Record
//!
//! - [`Attributes`](crate::prelude::Attributes)
//! - [`DatabaseConstraints`](crate::prelude::DatabaseConstraints)
//! - [`Record`](crate::prelude::Record)
//! - [`TruncationHook`](crate::prelude::TruncationHook)
//! - [`ValidationErrors`](crate::prelude::ValidationErrors)
//!
//! ### Value
//!
//! - [`Representation`](crate::prelude::Representation)
//! - [`Value`](crate::prelude::Value)
//!
//! ### Errors
//!
//! - [`ConstraintError`](crate::prelude::ConstraintError)
//! - [`ConstraintResult`](crate::prelude::ConstraintResult)
//!

#![doc(html_playground_url = "https://play.rust-lang.org")]

mod column;
mod config;
mod constraint;
mod encoding;
mod error;
mod factory;
pub mod prelude;
mod record;
mod resolve;
mod truncate;
mod validate;
mod value;
