//! This module exposes the [`ConstraintValidatorFactory`], which derives and caches the validators
//! of the attributes of a table.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, instrument, warn};

use crate::column::{ColumnDescriptor, ColumnProvider};
use crate::config::ConstraintsConfig;
use crate::constraint::{ConstraintKind, ConstraintSet};
use crate::encoding::is_three_byte_utf8_collation;
use crate::error::ConstraintResult;
use crate::resolve::{RangeResolver, ResolvedSizeLimit, SizeLimitResolver};
use crate::truncate::ColumnTruncator;
use crate::validate::{
    BmpContainmentValidator, NotNullValidator, NumericRangeValidator, SizeValidator, ValidatorSpec,
};

/// Key of a cached validator list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ValidatorKey {
    table: String,
    attribute: String,
    constraints: ConstraintSet,
}

/// Derives the validators enforcing the constraints of a column.
///
/// Validator lists are cached per table, attribute and requested constraints for the lifetime of
/// the factory. The schema is assumed not to change in the meantime: build a new factory to pick
/// up a reloaded schema.
///
/// # Example
///
/// ```rust
/// use column_constraints::prelude::{
///     ConstraintKind, ConstraintSet, ConstraintValidatorFactory, RawColumn, TableDescriptor,
/// };
///
/// let table = TableDescriptor::new(
///     "foos",
///     &[RawColumn::new("string", "varchar(40)").not_null().collation("utf8mb3_general_ci")],
/// )
/// .unwrap();
///
/// let factory = ConstraintValidatorFactory::default();
/// let validators = factory.validators_for(&table, "string", ConstraintSet::all()).unwrap();
/// let kinds = validators.iter().map(|v| v.kind()).collect::<Vec<_>>();
/// assert_eq!(
///     kinds,
///     vec![ConstraintKind::NotNull, ConstraintKind::Size, ConstraintKind::BmpContainment]
/// );
/// ```
#[derive(Debug, Default)]
pub struct ConstraintValidatorFactory {
    config: ConstraintsConfig,
    sizes: SizeLimitResolver,
    ranges: RangeResolver,
    validators: RwLock<HashMap<ValidatorKey, Arc<[ValidatorSpec]>>>,
}

impl ConstraintValidatorFactory {
    pub fn new(config: ConstraintsConfig) -> Self {
        Self {
            config,
            sizes: SizeLimitResolver::new(config.size_policy),
            ranges: RangeResolver,
            validators: RwLock::default(),
        }
    }

    pub fn config(&self) -> &ConstraintsConfig {
        &self.config
    }

    /// Returns the validators of an attribute, in the order they must run.
    ///
    /// Fails if no constraint or an unknown one is requested, if the attribute has no column, or if
    /// the column encoding cannot be resolved.
    #[instrument(name = "factory::validators_for", level = "debug", skip(self, provider), fields(table = provider.table_name()))]
    pub fn validators_for<P>(
        &self,
        provider: &P,
        attribute: &str,
        constraints: ConstraintSet,
    ) -> ConstraintResult<Arc<[ValidatorSpec]>>
    where
        P: ColumnProvider + ?Sized,
    {
        let constraints = ConstraintSet::from_bits_checked(constraints.bits()).inspect_err(|err| {
            warn!("invalid constraints for `{attribute}`: {err}");
        })?;
        let key = ValidatorKey {
            table: provider.table_name().to_string(),
            attribute: attribute.to_string(),
            constraints,
        };

        if let Some(validators) = self.validators.read().get(&key) {
            return Ok(Arc::clone(validators));
        }

        let column = provider.require_column(attribute).inspect_err(|err| {
            warn!("{err}");
        })?;
        let validators: Arc<[ValidatorSpec]> = self.derive(column, constraints)?.into();

        // another caller may have populated the entry meanwhile; keep the first one
        let mut cache = self.validators.write();
        let validators = cache.entry(key).or_insert(validators);
        debug!(count = validators.len(), "cached validators for `{attribute}`");
        Ok(Arc::clone(validators))
    }

    /// Derives the validators of a column without caching them.
    pub fn derive(
        &self,
        column: &ColumnDescriptor,
        constraints: ConstraintSet,
    ) -> ConstraintResult<Vec<ValidatorSpec>> {
        let mut validators = Vec::with_capacity(ConstraintKind::ALL.len());
        for kind in constraints.kinds() {
            let validator = match kind {
                ConstraintKind::NotNull => self.not_null_validator(column),
                ConstraintKind::Size => self.size_validator(column)?,
                ConstraintKind::BmpContainment => self.bmp_validator(column),
                ConstraintKind::Range => self.range_validator(column),
            };
            validators.extend(validator);
        }

        Ok(validators)
    }

    /// Builds the truncator of an attribute.
    pub fn truncator_for<P>(&self, provider: &P, attribute: &str) -> ConstraintResult<ColumnTruncator>
    where
        P: ColumnProvider + ?Sized,
    {
        let column = provider.require_column(attribute)?;
        Ok(ColumnTruncator::new(column, &self.sizes)?
            .with_transcode_policy(self.config.transcode_policy))
    }

    /// Resolves the size limit of a column, sharing the factory cache.
    pub fn size_limit(&self, column: &ColumnDescriptor) -> ConstraintResult<ResolvedSizeLimit> {
        self.sizes.resolve(column)
    }

    fn not_null_validator(&self, column: &ColumnDescriptor) -> Option<ValidatorSpec> {
        (!column.nullable()).then_some(ValidatorSpec::NotNull(NotNullValidator))
    }

    fn size_validator(&self, column: &ColumnDescriptor) -> ConstraintResult<Option<ValidatorSpec>> {
        if !column.is_text() && !column.is_binary() {
            return Ok(None);
        }

        let limit = self.sizes.resolve(column)?;
        Ok(limit.enforceable().map(|(maximum, unit)| {
            SizeValidator::new(maximum, unit)
                .with_encoding(limit.encoding)
                .with_transcode_policy(self.config.transcode_policy)
                .into()
        }))
    }

    fn bmp_validator(&self, column: &ColumnDescriptor) -> Option<ValidatorSpec> {
        let collation = column.collation()?;
        (column.is_text() && is_three_byte_utf8_collation(collation))
            .then_some(ValidatorSpec::BmpContainment(BmpContainmentValidator))
    }

    fn range_validator(&self, column: &ColumnDescriptor) -> Option<ValidatorSpec> {
        self.ranges
            .resolve(column)
            .map(|range| NumericRangeValidator::new(range).into())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::column::{RawColumn, TableDescriptor};
    use crate::config::{SizePolicy, TranscodePolicy};
    use crate::encoding::{EncodedText, Encoding};
    use crate::error::ConstraintError;
    use crate::resolve::SizeUnit;
    use crate::tests::{foos, magical_creatures, unicorns};
    use crate::value::Value;

    fn kinds(validators: &[ValidatorSpec]) -> Vec<ConstraintKind> {
        validators.iter().map(ValidatorSpec::kind).collect()
    }

    #[test]
    fn test_should_derive_size_validator_in_characters_for_varchar() {
        let factory = ConstraintValidatorFactory::default();
        let validators = factory
            .validators_for(&foos(), "string", ConstraintSet::SIZE)
            .unwrap();
        assert_eq!(
            validators.as_ref(),
            &[ValidatorSpec::Size(
                SizeValidator::new(40, SizeUnit::Characters).with_encoding(Some(Encoding::Utf8))
            )]
        );
    }

    #[test]
    fn test_should_derive_size_validator_in_bytes_for_text() {
        let factory = ConstraintValidatorFactory::default();
        let validators = factory
            .validators_for(&foos(), "tinytext", ConstraintSet::SIZE)
            .unwrap();
        assert_eq!(
            validators.as_ref(),
            &[ValidatorSpec::Size(
                SizeValidator::new(255, SizeUnit::Bytes).with_encoding(Some(Encoding::Utf8))
            )]
        );

        let validators = factory
            .validators_for(&foos(), "text", ConstraintSet::SIZE)
            .unwrap();
        assert!(matches!(
            validators.as_ref(),
            [ValidatorSpec::Size(SizeValidator { maximum: 65535, .. })]
        ));
    }

    #[test]
    fn test_should_skip_size_without_declared_limit_when_declared_only() {
        let factory = ConstraintValidatorFactory::new(
            ConstraintsConfig::default().with_size_policy(SizePolicy::DeclaredOnly),
        );
        let validators = factory
            .validators_for(&foos(), "text", ConstraintSet::SIZE)
            .unwrap();
        assert!(validators.is_empty());
    }

    #[test]
    fn test_should_carry_transcode_policy() {
        let factory = ConstraintValidatorFactory::new(
            ConstraintsConfig::default().with_transcode_policy(TranscodePolicy::Lossless),
        );
        let validators = factory
            .validators_for(&foos(), "tinytext", ConstraintSet::SIZE)
            .unwrap();
        assert!(matches!(
            validators.as_ref(),
            [ValidatorSpec::Size(SizeValidator {
                transcode_policy: TranscodePolicy::Lossless,
                ..
            })]
        ));
    }

    #[test]
    fn test_should_suppress_not_null_on_nullable_columns() {
        let factory = ConstraintValidatorFactory::default();
        let validators = factory
            .validators_for(&foos(), "string", ConstraintSet::NOT_NULL)
            .unwrap();
        assert!(validators.is_empty());

        let validators = factory
            .validators_for(&foos(), "checked", ConstraintSet::NOT_NULL)
            .unwrap();
        assert_eq!(kinds(&validators), vec![ConstraintKind::NotNull]);
    }

    #[test]
    fn test_should_derive_bmp_validator_for_three_byte_collations_only() {
        let factory = ConstraintValidatorFactory::default();
        let validators = factory
            .validators_for(&magical_creatures(), "string", ConstraintSet::BMP_CONTAINMENT)
            .unwrap();
        assert_eq!(kinds(&validators), vec![ConstraintKind::BmpContainment]);

        let validators = factory
            .validators_for(&unicorns(), "string", ConstraintSet::all())
            .unwrap();
        assert!(!kinds(&validators).contains(&ConstraintKind::BmpContainment));
    }

    #[test]
    fn test_should_derive_range_validator() {
        let factory = ConstraintValidatorFactory::default();
        let validators = factory
            .validators_for(&foos(), "checked", ConstraintSet::RANGE)
            .unwrap();
        let [ValidatorSpec::Range(validator)] = validators.as_ref() else {
            panic!("expected a range validator, got {validators:?}");
        };
        assert!(validator.allow_null);
        assert!(validator.range.requires_integer);
        assert_eq!(validator.range.to_string(), "[-2147483648, 2147483648)");
    }

    #[test]
    fn test_should_order_validators() {
        let factory = ConstraintValidatorFactory::default();
        let validators = factory
            .validators_for(&magical_creatures(), "string", ConstraintSet::all())
            .unwrap();
        assert_eq!(
            kinds(&validators),
            vec![
                ConstraintKind::NotNull,
                ConstraintKind::Size,
                ConstraintKind::BmpContainment
            ]
        );
    }

    #[test]
    fn test_should_fail_on_empty_constraints() {
        let factory = ConstraintValidatorFactory::default();
        assert!(matches!(
            factory.validators_for(&foos(), "string", ConstraintSet::empty()),
            Err(ConstraintError::UnknownConstraint(_))
        ));
    }

    #[test]
    fn test_should_fail_on_unknown_constraint_bits() {
        let factory = ConstraintValidatorFactory::default();
        assert_eq!(
            factory
                .validators_for(&foos(), "string", ConstraintSet::from_bits_retain(0b1_0000))
                .unwrap_err(),
            ConstraintError::UnknownConstraint("0b10000".to_string())
        );
        assert!(
            factory
                .validators_for(
                    &foos(),
                    "string",
                    ConstraintSet::from_bits_retain(ConstraintSet::SIZE.bits() | 0b1_0000)
                )
                .is_err()
        );
    }

    #[test]
    fn test_truncator_should_share_transcode_policy() {
        let factory = ConstraintValidatorFactory::new(
            ConstraintsConfig::default().with_transcode_policy(TranscodePolicy::Lossless),
        );
        let latin1 = Value::from(EncodedText::encode("ab", Encoding::Latin1).unwrap());
        let truncator = factory.truncator_for(&foos(), "tinytext").unwrap();
        assert_eq!(truncator.truncate(latin1.clone()), latin1);
    }

    #[test]
    fn test_should_fail_on_unknown_column() {
        let factory = ConstraintValidatorFactory::default();
        assert_eq!(
            factory
                .validators_for(&foos(), "missing", ConstraintSet::SIZE)
                .unwrap_err(),
            ConstraintError::UnknownColumn {
                table: "foos".to_string(),
                column: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_should_fail_on_unsupported_encoding() {
        let factory = ConstraintValidatorFactory::default();
        assert_eq!(
            factory
                .validators_for(&foos(), "latin", ConstraintSet::SIZE)
                .unwrap_err(),
            ConstraintError::UnsupportedEncoding {
                collation: "latin1_swedish_ci".to_string()
            }
        );
        // the encoding only matters to the size rule
        assert!(
            factory
                .validators_for(&foos(), "latin", ConstraintSet::NOT_NULL)
                .is_ok()
        );
    }

    #[test]
    fn test_should_cache_validators() {
        let factory = ConstraintValidatorFactory::default();
        let table = foos();
        let first = factory
            .validators_for(&table, "string", ConstraintSet::SIZE)
            .unwrap();
        let second = factory
            .validators_for(&table, "string", ConstraintSet::SIZE)
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let other = factory
            .validators_for(&table, "string", ConstraintSet::all())
            .unwrap();
        assert!(!Arc::ptr_eq(&first, &other));
    }

    #[test]
    fn test_should_key_cache_by_table_name() {
        let factory = ConstraintValidatorFactory::default();
        let first = factory
            .validators_for(&foos(), "string", ConstraintSet::SIZE)
            .unwrap();

        let renamed = TableDescriptor::new(
            "foos",
            &[RawColumn::new("string", "varchar(10)").collation("utf8mb4_bin")],
        )
        .unwrap();
        let second = factory
            .validators_for(&renamed, "string", ConstraintSet::SIZE)
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let fresh = ConstraintValidatorFactory::default()
            .validators_for(&renamed, "string", ConstraintSet::SIZE)
            .unwrap();
        assert!(matches!(
            fresh.as_ref(),
            [ValidatorSpec::Size(SizeValidator { maximum: 10, .. })]
        ));
    }

    #[test]
    fn test_should_share_cache_across_threads() {
        let factory = Arc::new(ConstraintValidatorFactory::default());
        let table = Arc::new(foos());

        let handles = (0..8)
            .map(|_| {
                let factory = Arc::clone(&factory);
                let table = Arc::clone(&table);
                std::thread::spawn(move || {
                    factory
                        .validators_for(table.as_ref(), "tinytext", ConstraintSet::all())
                        .unwrap()
                })
            })
            .collect::<Vec<_>>();

        let lists = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>();
        let cached = factory
            .validators_for(table.as_ref(), "tinytext", ConstraintSet::all())
            .unwrap();
        assert!(lists.iter().all(|list| Arc::ptr_eq(list, &cached)));
    }
}
