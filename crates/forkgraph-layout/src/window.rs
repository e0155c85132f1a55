//! Recency window over proposal sequence numbers.

use forkgraph_chain::{Boundary, Proposal, ProposalStore};

use crate::Limit;

/// The set of proposals in view: the `limit` most recent by `proposal_num`.
///
/// A proposal is in view iff `proposal_num > latest - limit`. The window is
/// anchored on the latest boundary's `proposal_num` and filters by sequence
/// number, never by chain height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    latest: u64,
    limit: Limit,
}

impl Window {
    pub fn new(latest: &Boundary, limit: Limit) -> Self {
        Self {
            latest: latest.proposal_num,
            limit,
        }
    }

    /// Whether a sequence number falls inside the window.
    #[inline]
    pub fn contains_num(&self, proposal_num: u64) -> bool {
        // latest - limit can go negative; compare in the widened sum instead.
        u128::from(proposal_num) + u128::from(self.limit.get()) > u128::from(self.latest)
    }

    /// Whether a proposal is in view.
    #[inline]
    pub fn contains(&self, proposal: &Proposal) -> bool {
        self.contains_num(proposal.proposal_num)
    }

    /// In-view proposals, in block hash order.
    pub fn select<'a>(&self, store: &'a ProposalStore) -> impl Iterator<Item = &'a Proposal> + 'a {
        let window = *self;
        store.iter().filter(move |p| window.contains(p))
    }

    pub fn limit(&self) -> Limit {
        self.limit
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}
