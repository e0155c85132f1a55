//! Cartesian coordinates from (height, slot) pairs.
//!
//! The root side of the window sits at x = 0 and the tip is the right-most
//! column: `x = column_width * (total_height - 1 - rank)`. Rows grow
//! downward: `y = row_height * slot`.

use std::collections::BTreeMap;

use forkgraph_chain::BlockHash;
use serde::{Deserialize, Serialize};

use crate::{HeightMap, SlotMap, Spacing};

/// A node position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: u64,
    pub y: u64,
}

impl Position {
    pub const fn new(x: u64, y: u64) -> Self {
        Self { x, y }
    }
}

/// Positions keyed by block hash, produced fresh by every layout run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub nodes: BTreeMap<BlockHash, Position>,
}

impl Layout {
    pub fn get(&self, hash: &BlockHash) -> Option<Position> {
        self.nodes.get(hash).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Column index for a rank, counted from the root side.
#[inline]
pub fn column(rank: u32, total_height: u32) -> Option<u32> {
    total_height.checked_sub(rank)?.checked_sub(1)
}

/// Combine heights and slots into positions.
///
/// A proposal whose height has no rank, or whose scaled position does not
/// fit in a `u64`, is left out.
pub fn assemble(heights: &HeightMap, slots: &SlotMap, spacing: Spacing) -> Layout {
    let total = heights.total_height();
    let mut nodes = BTreeMap::new();

    for (hash, placement) in slots.iter() {
        let Some(col) = heights
            .level(placement.canonical_num)
            .and_then(|rank| column(rank, total))
        else {
            tracing::trace!(%hash, canonical_num = placement.canonical_num, "no column, omitted");
            continue;
        };
        let x = spacing.column_width.checked_mul(u64::from(col));
        let y = spacing.row_height.checked_mul(u64::from(placement.slot));
        let (Some(x), Some(y)) = (x, y) else {
            tracing::warn!(%hash, col, slot = placement.slot, "position overflows u64, omitted");
            continue;
        };
        nodes.insert(hash.clone(), Position::new(x, y));
    }

    Layout { nodes }
}
