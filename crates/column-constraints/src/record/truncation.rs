use tracing::debug;

use super::Record;
use crate::column::ColumnProvider;
use crate::error::{ConstraintError, ConstraintResult};
use crate::factory::ConstraintValidatorFactory;
use crate::truncate::ColumnTruncator;

/// Truncates changed attributes to the size of their column before the record is validated.
///
/// Attributes which did not change are left alone, since they were already truncated when
/// they were last written.
#[derive(Debug, Clone)]
pub struct TruncationHook {
    truncators: Vec<(String, ColumnTruncator)>,
}

impl TruncationHook {
    pub fn register<P, I, S>(
        factory: &ConstraintValidatorFactory,
        provider: &P,
        attributes: I,
    ) -> ConstraintResult<Self>
    where
        P: ColumnProvider + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let truncators = attributes
            .into_iter()
            .map(|attribute| {
                let attribute = attribute.as_ref();
                factory
                    .truncator_for(provider, attribute)
                    .map(|truncator| (attribute.to_string(), truncator))
            })
            .collect::<ConstraintResult<Vec<_>>>()?;

        if truncators.is_empty() {
            return Err(ConstraintError::InvalidArgument(
                "at least one attribute is required".to_string(),
            ));
        }

        Ok(Self { truncators })
    }

    /// Truncates the changed attributes of the record, returning how many were shortened.
    pub fn apply<R>(&self, record: &mut R) -> usize
    where
        R: Record + ?Sized,
    {
        let mut truncated = 0;
        for (attribute, truncator) in &self.truncators {
            if !record.is_changed(attribute) {
                continue;
            }
            let Some(value) = record.attribute(attribute).cloned() else {
                continue;
            };

            let shortened = truncator.truncate(value.clone());
            if shortened != value {
                debug!(attribute = %attribute, "truncated attribute");
                record.set_attribute(attribute, shortened);
                truncated += 1;
            }
        }

        truncated
    }
}
