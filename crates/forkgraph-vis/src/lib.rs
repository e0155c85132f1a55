//! Forkgraph Visualization Export
//!
//! Loads proposal snapshots, runs the layout engine and emits the graph a
//! rendering frontend draws.
//!
//! # Architecture
//!
//! - **Snapshot**: JSON export of proposals plus an optional boundary index
//! - **GraphView**: nodes, edges and positions bundled for the frontend
//! - **CLI**: `forkgraph <snapshot.json>` writes the bundle as JSON
//!
//! # Usage
//!
//! ```ignore
//! let snapshot = Snapshot::load("goerli.json")?;
//! let (store, index) = snapshot.into_parts(&mut TracingSink, false)?;
//! let engine = LayoutEngine::new(&store, &index, LayoutConfig::default());
//! let view = GraphView::build(&engine);
//! ```

mod cli;
mod error;
mod graph;
mod snapshot;

pub use cli::{run, Cli};
pub use error::{Error, Result};
pub use graph::{GraphStats, GraphView};
pub use snapshot::Snapshot;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
