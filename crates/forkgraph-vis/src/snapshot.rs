//! Proposal snapshot files.
//!
//! A snapshot is the JSON export a block indexer produces:
//!
//! ```json
//! {
//!   "proposals": { "0xabc": { "proposalNum": 1, "canonicalNum": 1, ... } },
//!   "index": {
//!     "latestProposal": { "proposalHashes": ["0xabc"], "proposalNum": 1 },
//!     "oldestProposal": { "proposalHashes": ["0xabc"], "proposalNum": 1 },
//!     "childBlockHashes": {}
//!   }
//! }
//! ```
//!
//! The `index` section is optional. Without it the index is derived from the
//! proposals.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use forkgraph_chain::{BlockHash, BoundaryIndex, DiagnosticSink, ProposalRecord, ProposalStore};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Raw snapshot as read from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub proposals: BTreeMap<BlockHash, ProposalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<BoundaryIndex>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let snapshot = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            records = snapshot.proposals.len(),
            has_index = snapshot.index.is_some(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Validate records and settle on a boundary index.
    ///
    /// Malformed records go to `sink`. A supplied index that disagrees with
    /// the store is an error when `strict`, otherwise it is replaced by a
    /// derived one.
    pub fn into_parts(
        self,
        sink: &mut dyn DiagnosticSink,
        strict: bool,
    ) -> Result<(ProposalStore, BoundaryIndex)> {
        let store = ProposalStore::ingest(self.proposals, sink);

        let index = match self.index {
            Some(index) => match index.check_consistency(&store) {
                Ok(()) => index,
                Err(e) if strict => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(error = %e, "supplied index rejected, deriving from proposals");
                    BoundaryIndex::from_store(&store)
                }
            },
            None => BoundaryIndex::from_store(&store),
        };

        Ok((store, index))
    }
}
