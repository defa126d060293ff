use std::collections::{BTreeMap, BTreeSet};

use super::Record;
use crate::value::Value;

/// An in-memory [`Record`] tracking which attributes changed.
///
/// # Example
///
/// ```rust
/// use column_constraints::prelude::{Attributes, Record, Value};
///
/// let mut record = Attributes::persisted([("name", Value::from("Pegasus"))]);
/// assert!(!record.is_changed("name"));
///
/// record.set_attribute("name", Value::Null);
/// assert!(record.is_changed("name"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    values: BTreeMap<String, Value>,
    changed: BTreeSet<String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// A record as loaded from the database: no attribute is marked as changed.
    pub fn persisted<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
            changed: BTreeSet::new(),
        }
    }

    /// Sets an attribute, marking it as changed.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set_attribute(name, value.into());
        self
    }

    /// Value of an attribute, [`Value::Null`] when not set.
    pub fn get(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&Value::Null)
    }

    /// Names of the changed attributes, in alphabetical order.
    pub fn changed(&self) -> impl Iterator<Item = &str> {
        self.changed.iter().map(String::as_str)
    }

    /// Forgets about changes, as after a successful save.
    pub fn changes_applied(&mut self) {
        self.changed.clear();
    }
}

impl Record for Attributes {
    fn attribute(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    fn set_attribute(&mut self, name: &str, value: Value) {
        if self.values.get(name) != Some(&value) {
            self.changed.insert(name.to_string());
        }
        self.values.insert(name.to_string(), value);
    }

    fn is_changed(&self, name: &str) -> bool {
        self.changed.contains(name)
    }
}
