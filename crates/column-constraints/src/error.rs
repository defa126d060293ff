use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encoding::Encoding;

/// Column constraints error type.
///
/// Only configuration and resolution problems are errors; values which do not fit a column are
/// reported as [`crate::prelude::Violation`]s instead.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ConstraintError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// A value's encoding is unsupported by the column it is measured against: raised by byte
    /// limits under [`crate::prelude::TranscodePolicy::Strict`] when the value is not in the column
    /// encoding, or under the lossless policy when its bytes do not decode.
    /// [`ConstraintError::UnsupportedEncoding`] is reserved for collations.
    #[error("Cannot transcode value from {from} to {to} without loss")]
    Transcode { from: Encoding, to: Encoding },
    #[error("Table `{table}` does not have column `{column}`")]
    UnknownColumn { table: String, column: String },
    #[error("Unknown constraint: {0}")]
    UnknownConstraint(String),
    #[error("Unsupported encoding for collation `{collation}`")]
    UnsupportedEncoding { collation: String },
}

impl ConstraintError {
    /// Returns whether the error is caused by how validation was declared rather than by the schema.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::InvalidArgument(_)
                | Self::UnknownColumn { .. }
                | Self::UnknownConstraint(_)
        )
    }
}

/// Column constraints result type
pub type ConstraintResult<T> = Result<T, ConstraintError>;
