//! Boundary index over a proposal store.
//!
//! The index is the small amount of derived reference data the layout passes
//! need: where the history ends (latest), where it starts (oldest), and the
//! forward adjacency that parent pointers alone don't give.
//!
//! It is an immutable snapshot. When the store changes, build a new one.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::{BlockHash, ProposalStore};

/// One end of the proposal history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Boundary {
    /// Every proposal sharing the boundary `proposal_num`, sorted.
    pub proposal_hashes: Vec<BlockHash>,
    /// The boundary sequence number.
    pub proposal_num: u64,
}

impl Boundary {
    pub fn new(proposal_hashes: Vec<BlockHash>, proposal_num: u64) -> Self {
        Self {
            proposal_hashes,
            proposal_num,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.proposal_hashes.is_empty()
    }
}

/// Latest/oldest pointers plus parent → children adjacency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct BoundaryIndex {
    pub latest_proposal: Boundary,
    pub oldest_proposal: Boundary,
    pub child_block_hashes: BTreeMap<BlockHash, BTreeSet<BlockHash>>,
}

impl BoundaryIndex {
    /// Wrap a caller-supplied index. See [`check_consistency`](Self::check_consistency).
    pub fn new(
        latest_proposal: Boundary,
        oldest_proposal: Boundary,
        child_block_hashes: BTreeMap<BlockHash, BTreeSet<BlockHash>>,
    ) -> Self {
        Self {
            latest_proposal,
            oldest_proposal,
            child_block_hashes,
        }
    }

    /// Derive the index from a store.
    ///
    /// An empty store yields empty boundaries and no adjacency.
    pub fn from_store(store: &ProposalStore) -> Self {
        let mut latest = Boundary::default();
        let mut oldest = Boundary::default();
        let mut children: BTreeMap<BlockHash, BTreeSet<BlockHash>> = BTreeMap::new();

        for proposal in store {
            let num = proposal.proposal_num;

            if latest.is_empty() || num > latest.proposal_num {
                latest = Boundary::new(vec![proposal.hash.clone()], num);
            } else if num == latest.proposal_num {
                latest.proposal_hashes.push(proposal.hash.clone());
            }

            if oldest.is_empty() || num < oldest.proposal_num {
                oldest = Boundary::new(vec![proposal.hash.clone()], num);
            } else if num == oldest.proposal_num {
                oldest.proposal_hashes.push(proposal.hash.clone());
            }

            if let Some(parent) = &proposal.parent {
                children
                    .entry(parent.clone())
                    .or_default()
                    .insert(proposal.hash.clone());
            }
        }

        tracing::debug!(
            latest = latest.proposal_num,
            oldest = oldest.proposal_num,
            parents = children.len(),
            "derived boundary index"
        );

        Self::new(latest, oldest, children)
    }

    /// Children of `hash`, if the adjacency has an entry for it.
    #[inline]
    pub fn children(&self, hash: &BlockHash) -> Option<&BTreeSet<BlockHash>> {
        self.child_block_hashes.get(hash)
    }

    /// Check that the adjacency agrees with every proposal's parent pointer.
    ///
    /// Each proposal with a parent must appear among that parent's children,
    /// and every listed child that exists in the store must point back at
    /// the parent it is listed under. Boundary hashes must resolve and carry
    /// the boundary's `proposal_num`, and a non-empty store needs non-empty
    /// boundaries.
    pub fn check_consistency(&self, store: &ProposalStore) -> Result<()> {
        for proposal in store {
            let Some(parent) = &proposal.parent else {
                continue;
            };
            let listed = self
                .children(parent)
                .is_some_and(|kids| kids.contains(&proposal.hash));
            if !listed {
                return Err(Error::InconsistentIndex(format!(
                    "{} is not listed as a child of {}",
                    proposal.hash, parent
                )));
            }
        }

        for (parent, kids) in &self.child_block_hashes {
            for child in kids {
                let Some(proposal) = store.get(child) else {
                    continue;
                };
                if proposal.parent.as_ref() != Some(parent) {
                    return Err(Error::InconsistentIndex(format!(
                        "{} is listed under {} but its parent is {}",
                        child,
                        parent,
                        proposal
                            .parent
                            .as_ref()
                            .map_or("none", BlockHash::as_str)
                    )));
                }
            }
        }

        for (name, boundary) in [
            ("latest", &self.latest_proposal),
            ("oldest", &self.oldest_proposal),
        ] {
            if boundary.is_empty() && !store.is_empty() {
                return Err(Error::InconsistentIndex(format!(
                    "{name} boundary is empty but the store holds {} proposals",
                    store.len()
                )));
            }
            for hash in &boundary.proposal_hashes {
                let Some(proposal) = store.get(hash) else {
                    return Err(Error::InconsistentIndex(format!(
                        "{name} proposal {hash} is not in the store"
                    )));
                };
                if proposal.proposal_num != boundary.proposal_num {
                    return Err(Error::InconsistentIndex(format!(
                        "{name} proposal {hash} has proposal_num {} but the boundary says {}",
                        proposal.proposal_num, boundary.proposal_num
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Proposal;

    fn forked_store() -> ProposalStore {
        [
            Proposal::new("0xa", 100, 100),
            Proposal::new("0xb", 101, 101).with_parent("0xa"),
            Proposal::new("0xc", 102, 102).with_parent("0xb"),
            Proposal::new("0xd", 102, 102).with_parent("0xb"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn derives_boundaries_and_children() {
        let index = BoundaryIndex::from_store(&forked_store());

        assert_eq!(index.latest_proposal.proposal_num, 102);
        assert_eq!(
            index.latest_proposal.proposal_hashes,
            vec![BlockHash::from("0xc"), BlockHash::from("0xd")]
        );
        assert_eq!(index.oldest_proposal.proposal_num, 100);
        assert_eq!(index.oldest_proposal.proposal_hashes, vec![BlockHash::from("0xa")]);

        let kids: Vec<_> = index
            .children(&"0xb".into())
            .unwrap()
            .iter()
            .map(BlockHash::as_str)
            .collect();
        assert_eq!(kids, ["0xc", "0xd"]);
        assert!(index.children(&"0xc".into()).is_none());
    }

    #[test]
    fn derived_index_is_consistent() {
        let store = forked_store();
        BoundaryIndex::from_store(&store)
            .check_consistency(&store)
            .unwrap();
    }

    #[test]
    fn empty_store_gives_empty_index() {
        let index = BoundaryIndex::from_store(&ProposalStore::new());
        assert!(index.latest_proposal.is_empty());
        assert!(index.oldest_proposal.is_empty());
        assert!(index.child_block_hashes.is_empty());
    }

    #[test]
    fn missing_child_entry_is_inconsistent() {
        let store = forked_store();
        let mut index = BoundaryIndex::from_store(&store);
        index
            .child_block_hashes
            .get_mut(&BlockHash::from("0xb"))
            .unwrap()
            .remove(&BlockHash::from("0xd"));

        let err = index.check_consistency(&store).unwrap_err();
        assert!(matches!(err, Error::InconsistentIndex(msg) if msg.contains("0xd")));
    }

    #[test]
    fn child_under_wrong_parent_is_inconsistent() {
        let store = forked_store();
        let mut index = BoundaryIndex::from_store(&store);
        index
            .child_block_hashes
            .entry("0xa".into())
            .or_default()
            .insert("0xd".into());

        assert!(index.check_consistency(&store).is_err());
    }

    #[test]
    fn unknown_boundary_hash_is_inconsistent() {
        let store = forked_store();
        let mut index = BoundaryIndex::from_store(&store);
        index.latest_proposal.proposal_hashes.push("0xzz".into());
        assert!(index.check_consistency(&store).is_err());
    }

    #[test]
    fn boundary_num_must_match_its_hashes() {
        let store = forked_store();
        let mut index = BoundaryIndex::from_store(&store);
        index.latest_proposal.proposal_num = 0;

        let err = index.check_consistency(&store).unwrap_err();
        assert!(matches!(err, Error::InconsistentIndex(msg) if msg.contains("latest") && msg.contains("102")));
    }

    #[test]
    fn empty_boundary_over_populated_store_is_inconsistent() {
        let store = forked_store();
        let mut index = BoundaryIndex::from_store(&store);
        index.latest_proposal = Boundary::default();
        assert!(index.check_consistency(&store).is_err());

        let mut index = BoundaryIndex::from_store(&store);
        index.oldest_proposal = Boundary::default();
        assert!(index.check_consistency(&store).is_err());

        let empty = ProposalStore::new();
        assert!(BoundaryIndex::default().check_consistency(&empty).is_ok());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        // Each proposal i > 0 picks a parent among 0..i, so the result is a tree.
        fn arb_tree() -> impl Strategy<Value = ProposalStore> {
            prop::collection::vec(any::<prop::sample::Index>(), 1..40).prop_map(|picks| {
                let mut store = ProposalStore::new();
                store.insert(Proposal::new("h0", 0, 0));
                for (i, pick) in picks.iter().enumerate() {
                    let n = i as u64 + 1;
                    let parent = pick.index(i + 1);
                    store.insert(
                        Proposal::new(format!("h{n}"), n, n).with_parent(format!("h{parent}")),
                    );
                }
                store
            })
        }

        proptest! {
            #[test]
            fn derived_index_always_consistent(store in arb_tree()) {
                let index = BoundaryIndex::from_store(&store);
                prop_assert!(index.check_consistency(&store).is_ok());

                let listed: usize = index.child_block_hashes.values().map(BTreeSet::len).sum();
                prop_assert_eq!(listed, store.len() - 1);
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn index_uses_camel_case_keys() {
        let json = r#"{
            "latestProposal": { "proposalHashes": ["0xc"], "proposalNum": 102 },
            "oldestProposal": { "proposalHashes": ["0xa"] },
            "childBlockHashes": { "0xa": ["0xb"], "0xb": ["0xd", "0xc"] }
        }"#;
        let index: BoundaryIndex = serde_json::from_str(json).unwrap();
        assert_eq!(index.latest_proposal.proposal_num, 102);
        assert_eq!(index.oldest_proposal.proposal_num, 0);
        assert_eq!(index.children(&"0xb".into()).unwrap().len(), 2);

        // The defaulted oldest proposal_num does not match 0xa.
        let err = index.check_consistency(&forked_store()).unwrap_err();
        assert!(matches!(err, Error::InconsistentIndex(msg) if msg.contains("oldest proposal 0xa")));
    }
}
