//! Error types for forkgraph-layout.

use thiserror::Error;

/// Result type for forkgraph-layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations on the engine's own inputs.
///
/// Gaps in the data (unknown parents, missing adjacency) are never errors;
/// they only shrink the layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The display limit must be a positive integer.
    #[error("invalid limit {0}: must be at least 1")]
    InvalidLimit(u64),

    /// The ordering policy name was not recognised.
    #[error("unknown ordering policy `{0}`")]
    UnknownPolicy(String),

    /// The chain snapshot was rejected.
    #[error(transparent)]
    Chain(#[from] forkgraph_chain::Error),
}
