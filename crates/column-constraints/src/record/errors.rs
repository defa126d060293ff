use std::collections::BTreeMap;
use std::fmt;

use crate::validate::Violation;

/// Violations collected while validating a record, keyed by attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<Violation>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, attribute: &str, violation: Violation) {
        self.errors
            .entry(attribute.to_string())
            .or_default()
            .push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of violations.
    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Violations of one attribute, in the order its validators ran.
    pub fn get(&self, attribute: &str) -> &[Violation] {
        self.errors
            .get(attribute)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Attributes with at least one violation.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Violation)> {
        self.errors.iter().flat_map(|(attribute, violations)| {
            violations
                .iter()
                .map(move |violation| (attribute.as_str(), violation))
        })
    }

    /// Messages prefixed by their attribute, e.g. `string is too long (maximum is 40 characters)`.
    pub fn full_messages(&self) -> Vec<String> {
        self.iter()
            .map(|(attribute, violation)| format!("{attribute} {violation}"))
            .collect()
    }

    /// `Ok` when no violation was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_messages().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::resolve::SizeUnit;

    #[test]
    fn test_should_collect_violations_per_attribute() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.add("not_null_string", Violation::MustBeSet);
        errors.add(
            "not_null_string",
            Violation::TooLong {
                maximum: 255,
                count: 256,
                unit: SizeUnit::Characters,
            },
        );
        errors.add("checked", Violation::NotANumber);

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("not_null_string").len(), 2);
        assert!(errors.get("string").is_empty());
        assert_eq!(
            errors.full_messages(),
            vec![
                "checked is not a number",
                "not_null_string must be set",
                "not_null_string is too long (maximum is 255 characters)",
            ]
        );
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_should_be_ok_when_empty() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}
