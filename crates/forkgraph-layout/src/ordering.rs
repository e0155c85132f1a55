//! Sibling ordering.
//!
//! Every height can hold a canonical proposal and any number of uncles. The
//! forward pass finds them all and this module decides their vertical order.
//!
//! # Policies
//!
//! - [`Chronological`]: earliest `proposed_at` first, slots start at 1.
//! - [`AncestryDegree`]: fewest uncle hops from the canonical path first,
//!   slots start at 0, so the canonical spine sits on row 0.
//!
//! Whatever the policy says, equal keys fall back to block hash order. The
//! result is a total order and the same snapshot always yields the same
//! slots.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use forkgraph_chain::{BlockHash, BoundaryIndex, Proposal, ProposalStore};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::Window;

/// Orders proposals that claim the same height.
pub trait SiblingOrdering {
    /// Compare two siblings. Ties are broken by block hash afterwards.
    fn compare_siblings(&self, a: &Proposal, b: &Proposal) -> Ordering;

    /// Slot index given to the first sibling.
    fn first_slot(&self) -> u32 {
        0
    }
}

/// Earliest proposal first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chronological;

impl SiblingOrdering for Chronological {
    fn compare_siblings(&self, a: &Proposal, b: &Proposal) -> Ordering {
        a.proposed_at.cmp(&b.proposed_at)
    }

    fn first_slot(&self) -> u32 {
        1
    }
}

/// Canonical proposals first, then uncles by distance from the canonical path.
#[derive(Debug, Clone, Default)]
pub struct AncestryDegree {
    degrees: UncleDegrees,
}

impl AncestryDegree {
    pub fn new(degrees: UncleDegrees) -> Self {
        Self { degrees }
    }

    pub fn degrees(&self) -> &UncleDegrees {
        &self.degrees
    }
}

impl SiblingOrdering for AncestryDegree {
    fn compare_siblings(&self, a: &Proposal, b: &Proposal) -> Ordering {
        self.degrees
            .degree(&a.hash)
            .cmp(&self.degrees.degree(&b.hash))
    }
}

/// Selectable built-in policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderingPolicy {
    /// Sort by `proposed_at`
    Chronological,
    /// Sort by uncle degree, keeping the canonical chain on a straight line
    #[default]
    AncestryDegree,
}

impl OrderingPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderingPolicy::Chronological => "chronological",
            OrderingPolicy::AncestryDegree => "ancestry-degree",
        }
    }
}

impl fmt::Display for OrderingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderingPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chronological" => Ok(OrderingPolicy::Chronological),
            "ancestry-degree" | "ancestry" => Ok(OrderingPolicy::AncestryDegree),
            other => Err(Error::UnknownPolicy(other.to_owned())),
        }
    }
}

/// Hashes considered to be on the canonical chain.
///
/// An explicit `is_uncle` flag on a proposal always wins. Without one, a
/// proposal is canonical iff it is a tip or an ancestor of a tip. Ancestry
/// follows parent links through the whole store, not just the window.
#[derive(Debug, Clone, Default)]
pub struct CanonicalPath {
    members: BTreeSet<BlockHash>,
}

impl CanonicalPath {
    pub fn new(store: &ProposalStore, tips: &[BlockHash]) -> Self {
        let mut members = BTreeSet::new();
        for tip in tips {
            let mut cursor = Some(tip);
            // Stops at a root, an unknown parent, or a hash already walked.
            while let Some(hash) = cursor {
                if !members.insert(hash.clone()) {
                    break;
                }
                cursor = store.get(hash).and_then(|p| p.parent.as_ref());
            }
        }
        Self { members }
    }

    pub fn is_canonical(&self, proposal: &Proposal) -> bool {
        match proposal.is_uncle {
            Some(is_uncle) => !is_uncle,
            None => self.members.contains(&proposal.hash),
        }
    }
}

/// Memoized uncle degree per block hash.
///
/// `degree(p)` is 0 on the canonical path, else `1 + degree(parent(p))`.
/// The walk is iterative and follows parents past the window edge, so a
/// degree does not depend on the display limit. It stops at a canonical
/// ancestor, an unknown parent, a root, or a repeated hash.
#[derive(Debug, Clone, Default)]
pub struct UncleDegrees {
    cache: BTreeMap<BlockHash, u32>,
}

impl UncleDegrees {
    /// Compute degrees for every in-view proposal.
    pub fn compute(store: &ProposalStore, canonical: &CanonicalPath, window: &Window) -> Self {
        let mut degrees = Self::default();
        for proposal in window.select(store) {
            degrees.resolve(store, canonical, &proposal.hash);
        }
        degrees
    }

    /// Degree of a computed hash. Unknown hashes count as canonical.
    #[inline]
    pub fn degree(&self, hash: &BlockHash) -> u32 {
        self.cache.get(hash).copied().unwrap_or(0)
    }

    fn resolve(
        &mut self,
        store: &ProposalStore,
        canonical: &CanonicalPath,
        start: &BlockHash,
    ) -> u32 {
        if let Some(&degree) = self.cache.get(start) {
            return degree;
        }

        // Uncles met on the way up, nearest first.
        let mut uncles: Vec<BlockHash> = Vec::new();
        let mut visited: HashSet<&BlockHash> = HashSet::new();
        let mut cursor = start;

        let base = loop {
            if let Some(&degree) = self.cache.get(cursor) {
                break degree;
            }
            if !visited.insert(cursor) {
                tracing::warn!(hash = %cursor, "cycle in parent links");
                break 0;
            }
            let Some(proposal) = store.get(cursor) else {
                break 0;
            };
            if canonical.is_canonical(proposal) {
                self.cache.insert(cursor.clone(), 0);
                break 0;
            }
            uncles.push(cursor.clone());
            match &proposal.parent {
                Some(parent) => cursor = parent,
                None => break 0,
            }
        };

        let count = uncles.len() as u32;
        for (i, hash) in uncles.into_iter().enumerate() {
            self.cache.insert(hash, base + count - i as u32);
        }
        self.degree(start)
    }
}

/// Where a proposal landed in the forward pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub canonical_num: u64,
    pub slot: u32,
}

/// Slot assignments for every in-view proposal reached by the forward pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotMap {
    placements: BTreeMap<BlockHash, Placement>,
}

impl SlotMap {
    pub fn get(&self, hash: &BlockHash) -> Option<Placement> {
        self.placements.get(hash).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BlockHash, Placement)> {
        self.placements.iter().map(|(h, p)| (h, *p))
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Forward pass: every in-view proposal reachable from the oldest boundary,
/// grouped by `canonical_num`.
///
/// The oldest proposals themselves are included when in view. Out-of-view
/// proposals are walked through but not collected. A hash without an
/// adjacency entry is a leaf.
pub fn collect_rows<'a>(
    store: &'a ProposalStore,
    index: &'a BoundaryIndex,
    window: &Window,
    max_steps: usize,
) -> BTreeMap<u64, Vec<&'a Proposal>> {
    let mut rows: BTreeMap<u64, Vec<&'a Proposal>> = BTreeMap::new();
    let mut visited: HashSet<&BlockHash> = HashSet::new();
    let mut worklist: Vec<&BlockHash> = index.oldest_proposal.proposal_hashes.iter().rev().collect();
    let mut steps = 0usize;

    while let Some(hash) = worklist.pop() {
        if steps == max_steps {
            tracing::warn!(max_steps, pending = worklist.len() + 1, "sibling pass hit traversal cap");
            break;
        }
        steps += 1;

        if !visited.insert(hash) {
            continue;
        }
        if let Some(proposal) = store.get(hash) {
            if window.contains(proposal) {
                rows.entry(proposal.canonical_num).or_default().push(proposal);
            }
        }
        let Some(children) = index.children(hash) else {
            continue;
        };
        worklist.extend(children.iter().rev());
    }

    tracing::debug!(heights = rows.len(), steps, "collected sibling rows");
    rows
}

/// Sort each row with `ordering` and hand out consecutive slots.
pub fn assign_slots(
    rows: BTreeMap<u64, Vec<&Proposal>>,
    ordering: &dyn SiblingOrdering,
) -> SlotMap {
    let first = ordering.first_slot();
    let mut placements = BTreeMap::new();

    for (canonical_num, mut siblings) in rows {
        siblings.sort_by(|a, b| {
            ordering
                .compare_siblings(a, b)
                .then_with(|| a.hash.cmp(&b.hash))
        });
        for (i, proposal) in siblings.into_iter().enumerate() {
            placements.insert(
                proposal.hash.clone(),
                Placement {
                    canonical_num,
                    slot: first + i as u32,
                },
            );
        }
    }

    SlotMap { placements }
}
