//! Node and edge projection for the rendering layer.

use std::collections::BTreeMap;

use forkgraph_chain::{BlockHash, Boundary, Proposal, ProposalStore};
use serde::{Deserialize, Serialize};

use crate::{Limit, Window};

/// Display metadata for one proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    /// Label, the stringified `proposal_num`
    pub name: String,
    pub proposed_at: u64,
    pub propose_tx: Option<String>,
    pub hash: BlockHash,
    pub parent_block_hash: Option<BlockHash>,
    pub finalized: bool,
}

impl From<&Proposal> for NodeRecord {
    fn from(p: &Proposal) -> Self {
        Self {
            name: p.proposal_num.to_string(),
            proposed_at: p.proposed_at,
            propose_tx: p.proposal_tx.clone(),
            hash: p.hash.clone(),
            parent_block_hash: p.parent.clone(),
            finalized: p.finalized,
        }
    }
}

/// A parent → child link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: BlockHash,
    pub target: BlockHash,
}

/// Display nodes for every in-view proposal, keyed by block hash.
pub fn compute_nodes(
    store: &ProposalStore,
    latest: &Boundary,
    limit: Limit,
) -> BTreeMap<BlockHash, NodeRecord> {
    Window::new(latest, limit)
        .select(store)
        .map(|p| (p.hash.clone(), NodeRecord::from(p)))
        .collect()
}

/// One edge per in-view proposal, keyed by the child's block hash.
///
/// Roots have nothing to point at and produce no edge.
pub fn compute_edges(
    store: &ProposalStore,
    latest: &Boundary,
    limit: Limit,
) -> BTreeMap<BlockHash, EdgeRecord> {
    Window::new(latest, limit)
        .select(store)
        .filter_map(|p| {
            let source = p.parent.clone()?;
            Some((
                p.hash.clone(),
                EdgeRecord {
                    source,
                    target: p.hash.clone(),
                },
            ))
        })
        .collect()
}
