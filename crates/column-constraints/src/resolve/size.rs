use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace, warn};

use crate::column::{ColumnDescriptor, ColumnId, LogicalType};
use crate::config::SizePolicy;
use crate::encoding::Encoding;
use crate::error::ConstraintResult;

/// What a size limit counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeUnit {
    Characters,
    Bytes,
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Characters => write!(f, "characters"),
            Self::Bytes => write!(f, "bytes"),
        }
    }
}

/// The size rule of a column: how much it holds, counted in which unit, stored in which encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedSizeLimit {
    /// `None` when no maximum can be derived for the column.
    pub maximum: Option<u64>,
    /// `None` for columns whose type has no size semantics.
    pub unit: Option<SizeUnit>,
    /// Storage encoding, for text columns with a collation.
    pub encoding: Option<Encoding>,
}

impl ResolvedSizeLimit {
    /// The enforceable part of the limit, if any.
    pub fn enforceable(&self) -> Option<(u64, SizeUnit)> {
        Some((self.maximum?, self.unit?))
    }
}

/// Unit and type family default maximum of the sized column types.
fn type_limit(logical_type: LogicalType) -> Option<(SizeUnit, Option<u64>)> {
    const TINY: u64 = (1 << 8) - 1;
    const REGULAR: u64 = (1 << 16) - 1;
    const MEDIUM: u64 = (1 << 24) - 1;
    const LONG: u64 = (1 << 32) - 1;

    let limit = match logical_type {
        LogicalType::Char | LogicalType::Varchar => (SizeUnit::Characters, None),
        LogicalType::Binary | LogicalType::Varbinary => (SizeUnit::Bytes, None),
        LogicalType::Tinytext | LogicalType::Tinyblob => (SizeUnit::Bytes, Some(TINY)),
        LogicalType::Text | LogicalType::Blob => (SizeUnit::Bytes, Some(REGULAR)),
        LogicalType::Mediumtext | LogicalType::Mediumblob => (SizeUnit::Bytes, Some(MEDIUM)),
        LogicalType::Longtext | LogicalType::Longblob => (SizeUnit::Bytes, Some(LONG)),
        LogicalType::Decimal | LogicalType::Integer | LogicalType::Other => return None,
    };
    Some(limit)
}

/// Maps a column to its [`ResolvedSizeLimit`].
///
/// Results are memoized per column identity; the schema is assumed not to change while the
/// resolver lives.
#[derive(Debug, Default)]
pub struct SizeLimitResolver {
    policy: SizePolicy,
    cache: RwLock<HashMap<ColumnId, ResolvedSizeLimit>>,
}

impl SizeLimitResolver {
    pub fn new(policy: SizePolicy) -> Self {
        Self {
            policy,
            cache: RwLock::default(),
        }
    }

    pub fn policy(&self) -> SizePolicy {
        self.policy
    }

    /// Resolves the size limit of a column.
    ///
    /// Fails with [`crate::prelude::ConstraintError::UnsupportedEncoding`] for text columns whose
    /// collation is not of a UTF-8 family.
    #[instrument(name = "resolve::size", level = "trace", skip(self, column), fields(column = column.name()))]
    pub fn resolve(&self, column: &ColumnDescriptor) -> ConstraintResult<ResolvedSizeLimit> {
        if let Some(resolved) = self.cache.read().get(&column.id()) {
            return Ok(*resolved);
        }

        let resolved = self.compute(column)?;
        trace!(?resolved, "resolved size limit");
        self.cache.write().insert(column.id(), resolved);
        Ok(resolved)
    }

    fn compute(&self, column: &ColumnDescriptor) -> ConstraintResult<ResolvedSizeLimit> {
        let type_limit = type_limit(column.logical_type());
        let default_maximum = match self.policy {
            SizePolicy::TypeDefault => type_limit.and_then(|(_, maximum)| maximum),
            SizePolicy::DeclaredOnly => None,
        };

        let encoding = match column.collation() {
            Some(collation) if column.is_text() => {
                Some(Encoding::from_collation(collation).inspect_err(|err| {
                    warn!(column = column.name(), "cannot resolve column encoding: {err}");
                })?)
            }
            _ => None,
        };

        Ok(ResolvedSizeLimit {
            maximum: column.limit().or(default_maximum),
            unit: type_limit.map(|(unit, _)| unit),
            encoding,
        })
    }
}
