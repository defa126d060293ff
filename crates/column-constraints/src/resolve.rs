//! This module turns column metadata into concrete size and range rules.

mod range;
mod size;

pub use self::range::{RangeResolver, ResolvedRange};
pub use self::size::{ResolvedSizeLimit, SizeLimitResolver, SizeUnit};
