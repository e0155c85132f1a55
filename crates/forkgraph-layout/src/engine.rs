//! Layout engine facade.

use std::collections::BTreeMap;

use forkgraph_chain::{BlockHash, BoundaryIndex, ProposalStore};

use crate::coords::{assemble, Layout};
use crate::height::{resolve_heights, HeightMap};
use crate::ordering::{
    assign_slots, collect_rows, AncestryDegree, CanonicalPath, Chronological, OrderingPolicy,
    SiblingOrdering, SlotMap, UncleDegrees,
};
use crate::projector::{compute_edges, compute_nodes, EdgeRecord, NodeRecord};
use crate::{LayoutConfig, Limit, Window};

/// Runs the layout pipeline over one immutable snapshot.
///
/// The engine borrows the store and index; every call computes a fresh
/// result and nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct LayoutEngine<'a> {
    store: &'a ProposalStore,
    index: &'a BoundaryIndex,
    config: LayoutConfig,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(store: &'a ProposalStore, index: &'a BoundaryIndex, config: LayoutConfig) -> Self {
        Self {
            store,
            index,
            config,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// The window anchored on the latest proposal.
    pub fn window(&self) -> Window {
        Window::new(&self.index.latest_proposal, self.config.limit)
    }

    /// Display nodes for every in-view proposal.
    pub fn nodes(&self) -> BTreeMap<BlockHash, NodeRecord> {
        compute_nodes(self.store, &self.index.latest_proposal, self.config.limit)
    }

    /// Parent edges for every in-view proposal.
    pub fn edges(&self) -> BTreeMap<BlockHash, EdgeRecord> {
        compute_edges(self.store, &self.index.latest_proposal, self.config.limit)
    }

    /// Backward pass only.
    pub fn heights(&self) -> HeightMap {
        resolve_heights(
            self.store,
            &self.index.latest_proposal,
            &self.window(),
            self.config.max_traversal_steps,
        )
    }

    /// Forward pass with the given ordering.
    pub fn slots(&self, ordering: &dyn SiblingOrdering) -> SlotMap {
        let rows = collect_rows(
            self.store,
            self.index,
            &self.window(),
            self.config.max_traversal_steps,
        );
        assign_slots(rows, ordering)
    }

    /// Positions using the configured policy.
    pub fn layout(&self) -> Layout {
        let heights = self.heights();
        match self.config.policy {
            OrderingPolicy::Chronological => self.finish(heights, &Chronological),
            OrderingPolicy::AncestryDegree => {
                let ordering = self.ancestry_degree();
                self.finish(heights, &ordering)
            }
        }
    }

    /// Positions using a caller-supplied ordering.
    pub fn layout_with(&self, ordering: &dyn SiblingOrdering) -> Layout {
        self.finish(self.heights(), ordering)
    }

    /// The ancestry-degree ordering for this snapshot.
    pub fn ancestry_degree(&self) -> AncestryDegree {
        let canonical = CanonicalPath::new(self.store, &self.index.latest_proposal.proposal_hashes);
        AncestryDegree::new(UncleDegrees::compute(
            self.store,
            &canonical,
            &self.window(),
        ))
    }

    fn finish(&self, heights: HeightMap, ordering: &dyn SiblingOrdering) -> Layout {
        let slots = self.slots(ordering);
        let layout = assemble(&heights, &slots, self.config.spacing);
        tracing::debug!(
            policy = %self.config.policy,
            limit = %self.config.limit,
            total_height = heights.total_height(),
            placed = layout.len(),
            "computed layout"
        );
        layout
    }
}

/// One-shot layout with default spacing and traversal cap.
pub fn compute_layout(
    store: &ProposalStore,
    index: &BoundaryIndex,
    limit: Limit,
    policy: OrderingPolicy,
) -> Layout {
    let config = LayoutConfig {
        limit,
        policy,
        ..LayoutConfig::default()
    };
    LayoutEngine::new(store, index, config).layout()
}
