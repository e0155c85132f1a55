//! Graph bundle consumed by the rendering frontend.

use std::collections::BTreeMap;

use forkgraph_chain::BlockHash;
use forkgraph_layout::{EdgeRecord, Layout, LayoutEngine, NodeRecord};
use serde::{Deserialize, Serialize};

/// Nodes, edges and positions for one window of proposal history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: BTreeMap<BlockHash, NodeRecord>,
    pub edges: BTreeMap<BlockHash, EdgeRecord>,
    pub layouts: Layout,
}

impl GraphView {
    /// Run every projection of the engine.
    pub fn build(engine: &LayoutEngine<'_>) -> Self {
        Self {
            nodes: engine.nodes(),
            edges: engine.edges(),
            layouts: engine.layout(),
        }
    }

    /// Nodes that have no position.
    pub fn unplaced(&self) -> impl Iterator<Item = &BlockHash> {
        self.nodes
            .keys()
            .filter(move |h| !self.layouts.nodes.contains_key(*h))
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            placed: self.layouts.len(),
            finalized: self.nodes.values().filter(|n| n.finalized).count(),
        }
    }
}

/// Counts for a summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub placed: usize,
    pub finalized: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use forkgraph_chain::{BoundaryIndex, Proposal, ProposalStore};
    use forkgraph_layout::LayoutConfig;

    #[test]
    fn build_bundles_all_projections() {
        let store: ProposalStore = [
            Proposal::new("0xa", 1, 1).finalized(),
            Proposal::new("0xb", 2, 2).with_parent("0xa"),
            Proposal::new("0xc", 3, 2).with_parent("0xa"),
        ]
        .into_iter()
        .collect();
        let index = BoundaryIndex::from_store(&store);
        let view = GraphView::build(&LayoutEngine::new(&store, &index, LayoutConfig::default()));

        assert_eq!(
            view.stats(),
            GraphStats {
                nodes: 3,
                edges: 2,
                placed: 3,
                finalized: 1
            }
        );
        assert_eq!(view.unplaced().count(), 0);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json["layouts"]["nodes"]["0xa"]["x"].is_u64());
        assert_eq!(json["edges"]["0xb"]["source"], "0xa");
    }
}
