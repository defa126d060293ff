//! This module contains the contract with the record layer: how records expose their attributes,
//! and the hooks validating and truncating them before they are written.

mod attributes;
mod constraints;
mod errors;
mod truncation;

pub use self::attributes::Attributes;
pub use self::constraints::DatabaseConstraints;
pub use self::errors::ValidationErrors;
pub use self::truncation::TruncationHook;
use crate::value::Value;

/// A record whose attributes are about to be written to a table.
pub trait Record {
    /// Current value of an attribute; `None` when the record does not hold it.
    fn attribute(&self, name: &str) -> Option<&Value>;

    /// Replaces the value of an attribute.
    fn set_attribute(&mut self, name: &str, value: Value);

    /// Whether the attribute changed since the record was loaded or last saved.
    fn is_changed(&self, name: &str) -> bool;
}
