//! Proposal records.
//!
//! Two shapes exist for the same block:
//!
//! - [`ProposalRecord`] is the loose wire form. Every field is optional so a
//!   partially populated export still deserializes.
//! - [`Proposal`] is the validated form. Traversal code only ever sees this.
//!
//! Validation happens once, in [`ProposalRecord::validate`].

use crate::error::RecordDefect;
use crate::BlockHash;

/// One proposed block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Proposal {
    /// Unique identifier.
    pub hash: BlockHash,
    /// Global submission sequence number, strictly increasing.
    pub proposal_num: u64,
    /// Chain height this proposal claims. Siblings share it.
    pub canonical_num: u64,
    /// Parent block, `None` for a root.
    pub parent: Option<BlockHash>,
    /// Proposal timestamp.
    pub proposed_at: u64,
    /// Submitting transaction, carried through uninterpreted.
    pub proposal_tx: Option<String>,
    /// Irreversibly committed.
    pub finalized: bool,
    /// Explicit uncle marker, when the source knows it.
    pub is_uncle: Option<bool>,
}

impl Proposal {
    /// Create a root proposal with zeroed metadata.
    pub fn new(hash: impl Into<BlockHash>, proposal_num: u64, canonical_num: u64) -> Self {
        Self {
            hash: hash.into(),
            proposal_num,
            canonical_num,
            parent: None,
            proposed_at: 0,
            proposal_tx: None,
            finalized: false,
            is_uncle: None,
        }
    }

    /// Set the parent block.
    pub fn with_parent(mut self, parent: impl Into<BlockHash>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the proposal timestamp.
    pub fn proposed_at(mut self, at: u64) -> Self {
        self.proposed_at = at;
        self
    }

    /// Set the submitting transaction.
    pub fn with_tx(mut self, tx: impl Into<String>) -> Self {
        self.proposal_tx = Some(tx.into());
        self
    }

    /// Mark as finalized.
    pub fn finalized(mut self) -> Self {
        self.finalized = true;
        self
    }

    /// Set the explicit uncle marker.
    pub fn uncle(mut self, is_uncle: bool) -> Self {
        self.is_uncle = Some(is_uncle);
        self
    }

    /// Whether this proposal has no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Header section of a wire record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RecordHeader {
    pub parent_block: Option<BlockHash>,
}

/// A proposal as exported by the indexer, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ProposalRecord {
    pub proposal_num: Option<u64>,
    pub canonical_num: Option<u64>,
    pub proposed_at: Option<u64>,
    pub proposal_tx: Option<String>,
    pub finalized: Option<bool>,
    pub is_uncle: Option<bool>,
    pub hash: Option<BlockHash>,
    pub header: Option<RecordHeader>,
}

impl ProposalRecord {
    /// Validate the record stored under `key`.
    ///
    /// `proposalNum`, `canonicalNum` and `proposedAt` are required. A missing
    /// `hash` falls back to the key; a present one must equal it. A missing
    /// parent makes the proposal a root.
    pub fn validate(self, key: &BlockHash) -> Result<Proposal, RecordDefect> {
        let proposal_num = self
            .proposal_num
            .ok_or(RecordDefect::MissingField("proposalNum"))?;
        let canonical_num = self
            .canonical_num
            .ok_or(RecordDefect::MissingField("canonicalNum"))?;
        let proposed_at = self
            .proposed_at
            .ok_or(RecordDefect::MissingField("proposedAt"))?;

        if let Some(embedded) = self.hash {
            if &embedded != key {
                return Err(RecordDefect::HashMismatch { embedded });
            }
        }

        let parent = self.header.and_then(|h| h.parent_block);
        if parent.as_ref() == Some(key) {
            return Err(RecordDefect::SelfParent);
        }

        Ok(Proposal {
            hash: key.clone(),
            proposal_num,
            canonical_num,
            parent,
            proposed_at,
            proposal_tx: self.proposal_tx,
            finalized: self.finalized.unwrap_or(false),
            is_uncle: self.is_uncle,
        })
    }
}

impl From<&Proposal> for ProposalRecord {
    fn from(p: &Proposal) -> Self {
        Self {
            proposal_num: Some(p.proposal_num),
            canonical_num: Some(p.canonical_num),
            proposed_at: Some(p.proposed_at),
            proposal_tx: p.proposal_tx.clone(),
            finalized: Some(p.finalized),
            is_uncle: p.is_uncle,
            hash: Some(p.hash.clone()),
            header: Some(RecordHeader {
                parent_block: p.parent.clone(),
            }),
        }
    }
}
