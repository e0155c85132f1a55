//! Error types for forkgraph-chain.

use thiserror::Error;

use crate::BlockHash;

/// Result type for forkgraph-chain operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or checking a proposal snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A proposal record could not be turned into a [`crate::Proposal`].
    #[error("malformed proposal record {key}: {defect}")]
    MalformedRecord { key: BlockHash, defect: RecordDefect },

    /// A caller-supplied boundary index disagrees with the store.
    #[error("inconsistent boundary index: {0}")]
    InconsistentIndex(String),
}

/// What is wrong with a rejected proposal record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordDefect {
    /// A required field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The embedded hash differs from the key the record was stored under.
    #[error("embedded hash {embedded} does not match its key")]
    HashMismatch { embedded: BlockHash },

    /// The record names itself as its parent.
    #[error("proposal lists itself as parent")]
    SelfParent,
}
