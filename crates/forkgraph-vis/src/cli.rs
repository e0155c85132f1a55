//! Command-line interface.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use forkgraph_chain::TracingSink;
use forkgraph_layout::{
    LayoutConfig, LayoutEngine, Limit, OrderingPolicy, Spacing, COLUMN_WIDTH,
    DEFAULT_LIMIT, DEFAULT_MAX_TRAVERSAL_STEPS, ROW_HEIGHT,
};

use crate::error::Result;
use crate::{GraphView, Snapshot};

/// Lay out a rollup's proposal history as a fork graph
#[derive(Parser, Debug, Clone)]
#[command(name = "forkgraph")]
#[command(version)]
#[command(about = "Lay out a rollup's proposal history as a fork graph")]
#[command(long_about = "Reads a proposal snapshot (JSON), places the most recent proposals \
    on a canonical spine with uncles fanned out beneath, and writes nodes, edges and \
    positions as JSON for a rendering frontend.")]
pub struct Cli {
    /// Snapshot file with `proposals` and an optional `index`
    pub snapshot: PathBuf,

    /// Number of most recent proposals to keep in view
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u64,

    /// Sibling ordering (chronological, ancestry-degree)
    #[arg(short, long, default_value_t = OrderingPolicy::default())]
    pub policy: OrderingPolicy,

    /// Horizontal distance between height columns
    #[arg(long, default_value_t = COLUMN_WIDTH)]
    pub column_width: u64,

    /// Vertical distance between sibling rows
    #[arg(long, default_value_t = ROW_HEIGHT)]
    pub row_height: u64,

    /// Cap on worklist pops per traversal pass
    #[arg(long, default_value_t = DEFAULT_MAX_TRAVERSAL_STEPS)]
    pub max_steps: usize,

    /// Fail if the snapshot's index disagrees with its proposals
    #[arg(long)]
    pub strict_index: bool,

    /// Write output here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the engine configuration, validating the limit.
    pub fn layout_config(&self) -> Result<LayoutConfig> {
        Ok(LayoutConfig {
            limit: Limit::new(self.limit)?,
            policy: self.policy,
            spacing: Spacing {
                column_width: self.column_width,
                row_height: self.row_height,
            },
            max_traversal_steps: self.max_steps,
        })
    }
}

/// Load the snapshot, compute the graph and write it out.
pub fn run(cli: &Cli) -> Result<GraphView> {
    let config = cli.layout_config()?;
    let snapshot = Snapshot::load(&cli.snapshot)?;
    let (store, index) = snapshot.into_parts(&mut TracingSink, cli.strict_index)?;

    let engine = LayoutEngine::new(&store, &index, config);
    let view = GraphView::build(&engine);

    let stats = view.stats();
    tracing::info!(
        nodes = stats.nodes,
        edges = stats.edges,
        placed = stats.placed,
        finalized = stats.finalized,
        "graph ready"
    );
    for hash in view.unplaced() {
        tracing::debug!(%hash, "node has no position");
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };

    match &cli.output {
        Some(path) => fs::write(path, json)?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(view)
}
