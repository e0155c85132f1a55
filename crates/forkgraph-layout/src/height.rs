//! Depth-from-tip ranks.
//!
//! Walks parent pointers backwards from the tip. Each newly discovered parent
//! hash gets the next rank, so rank 0 is the tip's immediate parent and ranks
//! grow toward the root.
//!
//! A rank is handed out while processing a child, which makes it the
//! distance of that child's level from the tip. The child's `canonical_num`
//! is recorded against the rank, and every proposal claiming that height
//! (uncles included) lands in the same column.
//!
//! # Terminal conditions
//!
//! A branch ends quietly when the popped hash is not in the store (the
//! ancestry is exhausted) or when its proposal is out of the window. Neither
//! is an error.

use std::collections::BTreeMap;

use forkgraph_chain::{BlockHash, Boundary, ProposalStore};

use crate::Window;

/// Ranks produced by one backward pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeightMap {
    ranks: BTreeMap<BlockHash, u32>,
    levels: BTreeMap<u64, u32>,
    total_height: u32,
}

impl HeightMap {
    /// Rank assigned to a parent hash.
    #[inline]
    pub fn rank(&self, hash: &BlockHash) -> Option<u32> {
        self.ranks.get(hash).copied()
    }

    /// Rank of the level holding proposals at `canonical_num`.
    #[inline]
    pub fn level(&self, canonical_num: u64) -> Option<u32> {
        self.levels.get(&canonical_num).copied()
    }

    /// Number of distinct ranks produced.
    #[inline]
    pub fn total_height(&self) -> u32 {
        self.total_height
    }

    /// Ranked hashes in hash order.
    pub fn ranked(&self) -> impl Iterator<Item = (&BlockHash, u32)> {
        self.ranks.iter().map(|(h, r)| (h, *r))
    }

    pub fn is_empty(&self) -> bool {
        self.total_height == 0
    }

    fn next_rank(&mut self) -> u32 {
        let rank = self.total_height;
        self.total_height += 1;
        rank
    }
}

/// Run the backward pass from every tip in `latest`.
///
/// At most `max_steps` hashes are popped. Hitting the cap ends the pass with
/// whatever ranks were produced so far.
pub fn resolve_heights(
    store: &ProposalStore,
    latest: &Boundary,
    window: &Window,
    max_steps: usize,
) -> HeightMap {
    let mut map = HeightMap::default();
    // Reversed so the lowest tip hash is popped first.
    let mut worklist: Vec<BlockHash> = latest.proposal_hashes.iter().rev().cloned().collect();
    let mut steps = 0usize;

    while let Some(hash) = worklist.pop() {
        if steps == max_steps {
            tracing::warn!(max_steps, pending = worklist.len() + 1, "height pass hit traversal cap");
            break;
        }
        steps += 1;

        let Some(proposal) = store.get(&hash) else {
            tracing::trace!(%hash, "ancestry exhausted");
            continue;
        };
        if !window.contains(proposal) {
            tracing::trace!(%hash, num = proposal.proposal_num, "left window");
            continue;
        }

        match &proposal.parent {
            Some(parent) => {
                let (rank, fresh) = match map.ranks.get(parent) {
                    Some(&rank) => (rank, false),
                    None => {
                        let rank = map.next_rank();
                        map.ranks.insert(parent.clone(), rank);
                        (rank, true)
                    }
                };
                map.levels.entry(proposal.canonical_num).or_insert(rank);
                if fresh {
                    worklist.push(parent.clone());
                }
            }
            None => {
                // A root in view still needs a column of its own.
                if !map.levels.contains_key(&proposal.canonical_num) {
                    let rank = map.next_rank();
                    map.levels.insert(proposal.canonical_num, rank);
                }
            }
        }
    }

    tracing::debug!(total_height = map.total_height, steps, "resolved heights");
    map
}
