//! Engine configuration.

use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ordering::OrderingPolicy;

/// Default number of most recent proposals kept in view.
pub const DEFAULT_LIMIT: u64 = 100;

/// Horizontal distance between height columns.
pub const COLUMN_WIDTH: u64 = 180;

/// Vertical distance between sibling rows.
pub const ROW_HEIGHT: u64 = 80;

/// Worklist pops allowed per traversal pass before the pass gives up.
pub const DEFAULT_MAX_TRAVERSAL_STEPS: usize = 1_000_000;

/// Display limit: how many of the most recent proposals are in view.
///
/// Always at least 1. Zero is rejected at construction, before any
/// traversal runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Limit(NonZeroU64);

impl Limit {
    /// The default limit of 100.
    pub const DEFAULT: Self = match NonZeroU64::new(DEFAULT_LIMIT) {
        Some(n) => Self(n),
        None => panic!("default limit is zero"),
    };

    /// Validate a raw limit.
    ///
    /// ```
    /// use forkgraph_layout::Limit;
    ///
    /// assert_eq!(Limit::new(10).unwrap().get(), 10);
    /// assert!(Limit::new(0).is_err());
    /// ```
    pub fn new(limit: u64) -> Result<Self> {
        NonZeroU64::new(limit)
            .map(Self)
            .ok_or(Error::InvalidLimit(limit))
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u64> for Limit {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Limit> for u64 {
    fn from(value: Limit) -> Self {
        value.get()
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Column and row spacing for the coordinate assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    pub column_width: u64,
    pub row_height: u64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            column_width: COLUMN_WIDTH,
            row_height: ROW_HEIGHT,
        }
    }
}

/// Configuration for one layout run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Window size in proposals
    pub limit: Limit,
    /// How siblings at one height are ordered
    pub policy: OrderingPolicy,
    /// Coordinate spacing
    pub spacing: Spacing,
    /// Cap on worklist pops per traversal pass
    pub max_traversal_steps: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            limit: Limit::DEFAULT,
            policy: OrderingPolicy::default(),
            spacing: Spacing::default(),
            max_traversal_steps: DEFAULT_MAX_TRAVERSAL_STEPS,
        }
    }
}
