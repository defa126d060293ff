//! Policies which are a matter of taste rather than of schema.

use serde::{Deserialize, Serialize};

use crate::error::{ConstraintError, ConstraintResult};

/// Where the maximum size of a text or binary column comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizePolicy {
    /// Columns without an explicit limit get the maximum implied by their type family,
    /// e.g. 65535 bytes for `text`.
    #[default]
    TypeDefault,
    /// Only explicitly declared limits are enforced.
    DeclaredOnly,
}

/// What the byte size validator does with values not already in the column encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscodePolicy {
    /// Refuse to measure the value and fail with [`ConstraintError::Transcode`].
    #[default]
    Strict,
    /// Transcode the value first, failing only if the conversion would lose data.
    Lossless,
}

/// Configuration of a [`crate::prelude::ConstraintValidatorFactory`].
///
/// # Example
///
/// ```rust
/// use column_constraints::prelude::{ConstraintsConfig, SizePolicy, TranscodePolicy};
///
/// let config = ConstraintsConfig::from_json(r#"{ "transcode_policy": "lossless" }"#).unwrap();
/// assert_eq!(config.size_policy, SizePolicy::TypeDefault);
/// assert_eq!(config.transcode_policy, TranscodePolicy::Lossless);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintsConfig {
    pub size_policy: SizePolicy,
    pub transcode_policy: TranscodePolicy,
}

impl ConstraintsConfig {
    pub fn from_json(json: &str) -> ConstraintResult<Self> {
        serde_json::from_str(json).map_err(|err| ConstraintError::Config(err.to_string()))
    }

    pub fn with_size_policy(mut self, size_policy: SizePolicy) -> Self {
        self.size_policy = size_policy;
        self
    }

    pub fn with_transcode_policy(mut self, transcode_policy: TranscodePolicy) -> Self {
        self.transcode_policy = transcode_policy;
        self
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_should_default_to_safe_policies() {
        let config = ConstraintsConfig::default();
        assert_eq!(config.size_policy, SizePolicy::TypeDefault);
        assert_eq!(config.transcode_policy, TranscodePolicy::Strict);
    }

    #[test]
    fn test_should_parse_config() {
        let config = ConstraintsConfig::from_json(
            r#"{ "size_policy": "declared_only", "transcode_policy": "strict" }"#,
        )
        .unwrap();
        assert_eq!(config.size_policy, SizePolicy::DeclaredOnly);
        assert_eq!(ConstraintsConfig::from_json("{}").unwrap(), ConstraintsConfig::default());
    }

    #[test]
    fn test_should_reject_unknown_policy() {
        let result = ConstraintsConfig::from_json(r#"{ "size_policy": "whatever" }"#);
        assert!(matches!(result, Err(ConstraintError::Config(_))));
    }
}
