//! Proposal store and ingestion diagnostics.

use std::collections::BTreeMap;

use crate::error::RecordDefect;
use crate::{BlockHash, Proposal, ProposalRecord};

/// Receiver for records that were dropped during ingestion.
///
/// Ingestion never fails as a whole. Each bad record is handed to the sink
/// and skipped so the rest of the snapshot still renders.
pub trait DiagnosticSink {
    /// A record stored under `key` was rejected.
    fn record_skipped(&mut self, key: &BlockHash, defect: &RecordDefect);
}

/// Sink that reports through `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record_skipped(&mut self, key: &BlockHash, defect: &RecordDefect) {
        tracing::warn!(%key, %defect, "skipping malformed proposal record");
    }
}

/// Sink that keeps every rejection, mostly for tests and summaries.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    pub skipped: Vec<(BlockHash, RecordDefect)>,
}

impl DiagnosticSink for CollectingSink {
    fn record_skipped(&mut self, key: &BlockHash, defect: &RecordDefect) {
        self.skipped.push((key.clone(), defect.clone()));
    }
}

/// Validated proposals keyed by block hash.
///
/// Iteration is in block hash order, which keeps everything downstream
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposalStore {
    proposals: BTreeMap<BlockHash, Proposal>,
}

impl ProposalStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate wire records into a store, reporting rejects to `sink`.
    pub fn ingest<I>(records: I, sink: &mut dyn DiagnosticSink) -> Self
    where
        I: IntoIterator<Item = (BlockHash, ProposalRecord)>,
    {
        let mut store = Self::new();
        let mut rejected = 0usize;

        for (key, record) in records {
            match record.validate(&key) {
                Ok(proposal) => {
                    store.insert(proposal);
                }
                Err(defect) => {
                    rejected += 1;
                    sink.record_skipped(&key, &defect);
                }
            }
        }

        tracing::debug!(accepted = store.len(), rejected, "ingested proposal records");
        store
    }

    /// Insert a proposal, returning any previous one with the same hash.
    pub fn insert(&mut self, proposal: Proposal) -> Option<Proposal> {
        self.proposals.insert(proposal.hash.clone(), proposal)
    }

    /// Look up a proposal by hash.
    #[inline]
    pub fn get(&self, hash: &BlockHash) -> Option<&Proposal> {
        self.proposals.get(hash)
    }

    /// Whether a proposal with this hash exists.
    #[inline]
    pub fn contains(&self, hash: &BlockHash) -> bool {
        self.proposals.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    /// Proposals in block hash order.
    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }
}

impl FromIterator<Proposal> for ProposalStore {
    fn from_iter<T: IntoIterator<Item = Proposal>>(iter: T) -> Self {
        let mut store = Self::new();
        for proposal in iter {
            store.insert(proposal);
        }
        store
    }
}

impl<'a> IntoIterator for &'a ProposalStore {
    type Item = &'a Proposal;
    type IntoIter = std::collections::btree_map::Values<'a, BlockHash, Proposal>;

    fn into_iter(self) -> Self::IntoIter {
        self.proposals.values()
    }
}
