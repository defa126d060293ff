use std::sync::Arc;

use tracing::{debug, instrument};

use super::{Record, ValidationErrors};
use crate::column::ColumnProvider;
use crate::constraint::ConstraintSet;
use crate::error::{ConstraintError, ConstraintResult};
use crate::factory::ConstraintValidatorFactory;
use crate::validate::{Validate, ValidatorSpec};
use crate::value::Value;

/// The database constraints registered for a set of attributes of a table.
///
/// Validators are derived when registering, so that configuration errors surface before any
/// record is validated.
///
/// # Example
///
/// ```rust
/// use column_constraints::prelude::{
///     Attributes, ConstraintValidatorFactory, DatabaseConstraints, RawColumn, TableDescriptor,
/// };
///
/// let table = TableDescriptor::new(
///     "foos",
///     &[RawColumn::new("string", "varchar(4)").collation("utf8mb4_bin")],
/// )
/// .unwrap();
/// let factory = ConstraintValidatorFactory::default();
/// let constraints = DatabaseConstraints::register_named(&factory, &table, ["string"], ["all"])
///     .unwrap();
///
/// let errors = constraints.validate(&Attributes::new().with("string", "magic")).unwrap();
/// assert_eq!(errors.full_messages(), vec!["string is too long (maximum is 4 characters)"]);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConstraints {
    table: String,
    validators: Vec<(String, Arc<[ValidatorSpec]>)>,
}

impl DatabaseConstraints {
    /// Registers the given constraints on the attributes.
    ///
    /// Fails with [`ConstraintError::InvalidArgument`] if no attribute is given, and with the
    /// factory errors otherwise.
    #[instrument(name = "record::register", level = "debug", skip_all, fields(table = provider.table_name()))]
    pub fn register<P, I, S>(
        factory: &ConstraintValidatorFactory,
        provider: &P,
        attributes: I,
        constraints: ConstraintSet,
    ) -> ConstraintResult<Self>
    where
        P: ColumnProvider + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let validators = attributes
            .into_iter()
            .map(|attribute| {
                let attribute = attribute.as_ref();
                factory
                    .validators_for(provider, attribute, constraints)
                    .map(|validators| (attribute.to_string(), validators))
            })
            .collect::<ConstraintResult<Vec<_>>>()?;

        if validators.is_empty() {
            return Err(ConstraintError::InvalidArgument(
                "at least one attribute is required".to_string(),
            ));
        }

        debug!(attributes = validators.len(), "registered database constraints");
        Ok(Self {
            table: provider.table_name().to_string(),
            validators,
        })
    }

    /// Same as [`DatabaseConstraints::register`], with constraints given by name.
    pub fn register_named<P, I, S, N, T>(
        factory: &ConstraintValidatorFactory,
        provider: &P,
        attributes: I,
        constraints: N,
    ) -> ConstraintResult<Self>
    where
        P: ColumnProvider + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        N: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let constraints = ConstraintSet::parse(constraints)?;
        Self::register(factory, provider, attributes, constraints)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.validators.iter().map(|(attribute, _)| attribute.as_str())
    }

    /// Validators registered for an attribute.
    pub fn validators(&self, attribute: &str) -> Option<&[ValidatorSpec]> {
        self.validators
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, validators)| validators.as_ref())
    }

    /// Runs every validator of every attribute, collecting all violations.
    ///
    /// Attributes the record does not hold are validated as [`Value::Null`]. Only values which
    /// cannot be examined at all make this fail.
    pub fn validate<R>(&self, record: &R) -> ConstraintResult<ValidationErrors>
    where
        R: Record + ?Sized,
    {
        let mut errors = ValidationErrors::new();
        for (attribute, validators) in &self.validators {
            let value = record.attribute(attribute).unwrap_or(&Value::Null);
            for validator in validators.iter() {
                if let Some(violation) = validator.validate(value)?.into_violation() {
                    errors.add(attribute, violation);
                }
            }
        }

        Ok(errors)
    }
}
