//! Error types for forkgraph-vis.

use thiserror::Error;

/// Result type for forkgraph-vis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a snapshot or writing a graph.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot or output JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rejected layout input
    #[error("Layout error: {0}")]
    Layout(#[from] forkgraph_layout::Error),

    /// Rejected chain snapshot
    #[error("Snapshot error: {0}")]
    Chain(#[from] forkgraph_chain::Error),
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Io(_) => 74,
            Error::Json(_) | Error::Chain(_) => 65,
            Error::Layout(_) => 64,
        }
    }
}
