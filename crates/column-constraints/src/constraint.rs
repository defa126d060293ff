//! Kinds of constraints which can be derived from a column.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::{ConstraintError, ConstraintResult};

/// A category of rule derivable from column metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    NotNull,
    Size,
    BmpContainment,
    Range,
}

impl ConstraintKind {
    /// Every kind, in the order validators are produced and run.
    pub const ALL: [ConstraintKind; 4] = [
        ConstraintKind::NotNull,
        ConstraintKind::Size,
        ConstraintKind::BmpContainment,
        ConstraintKind::Range,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::NotNull => "not_null",
            Self::Size => "size",
            Self::BmpContainment => "bmp_containment",
            Self::Range => "range",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ConstraintKind {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_null" => Ok(Self::NotNull),
            "size" => Ok(Self::Size),
            "bmp_containment" | "basic_multilingual_plane" => Ok(Self::BmpContainment),
            "range" => Ok(Self::Range),
            other => Err(ConstraintError::UnknownConstraint(other.to_string())),
        }
    }
}

bitflags! {
    /// A set of requested [`ConstraintKind`]s.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub struct ConstraintSet: u8 {
        const NOT_NULL = 0b0001;
        const SIZE = 0b0010;
        const BMP_CONTAINMENT = 0b0100;
        const RANGE = 0b1000;
    }
}

impl From<ConstraintKind> for ConstraintSet {
    fn from(kind: ConstraintKind) -> Self {
        match kind {
            ConstraintKind::NotNull => Self::NOT_NULL,
            ConstraintKind::Size => Self::SIZE,
            ConstraintKind::BmpContainment => Self::BMP_CONTAINMENT,
            ConstraintKind::Range => Self::RANGE,
        }
    }
}

impl FromIterator<ConstraintKind> for ConstraintSet {
    fn from_iter<T: IntoIterator<Item = ConstraintKind>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, kind| set | Self::from(kind))
    }
}

impl ConstraintSet {
    /// What gets checked when nothing more specific is asked for.
    pub const DEFAULT: Self = Self::SIZE;

    /// Parses constraint names.
    ///
    /// Besides the kind names, the presets `default` and `all` are understood. An empty list or an
    /// unknown name fails with [`ConstraintError::UnknownConstraint`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use column_constraints::prelude::ConstraintSet;
    ///
    /// let set = ConstraintSet::parse(["size", "basic_multilingual_plane"]).unwrap();
    /// assert!(set.contains(ConstraintSet::SIZE | ConstraintSet::BMP_CONTAINMENT));
    /// assert!(ConstraintSet::parse(["unique"]).is_err());
    /// assert!(ConstraintSet::parse(Vec::<&str>::new()).is_err());
    /// ```
    pub fn parse<I, S>(names: I) -> ConstraintResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        for name in names {
            set |= match name.as_ref() {
                "default" => Self::DEFAULT,
                "all" => Self::all(),
                other => other.parse::<ConstraintKind>()?.into(),
            };
        }
        set.ensure_not_empty()
    }

    /// Builds a set out of raw bits, rejecting bits which name no constraint.
    pub fn from_bits_checked(bits: u8) -> ConstraintResult<Self> {
        Self::from_bits(bits)
            .ok_or_else(|| ConstraintError::UnknownConstraint(format!("{bits:#06b}")))?
            .ensure_not_empty()
    }

    /// Fails with [`ConstraintError::UnknownConstraint`] if no constraint is requested.
    pub fn ensure_not_empty(self) -> ConstraintResult<Self> {
        if self.is_empty() {
            Err(ConstraintError::UnknownConstraint(
                "no constraint requested".to_string(),
            ))
        } else {
            Ok(self)
        }
    }

    pub fn includes(&self, kind: ConstraintKind) -> bool {
        self.contains(kind.into())
    }

    /// The requested kinds, in the order validators are produced and run.
    pub fn kinds(&self) -> impl Iterator<Item = ConstraintKind> + '_ {
        ConstraintKind::ALL
            .into_iter()
            .filter(|kind| self.includes(*kind))
    }
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}
