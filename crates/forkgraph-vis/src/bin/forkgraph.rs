//! Forkgraph command-line entry point
//!
//! Reads a proposal snapshot and writes the laid-out fork graph as JSON.

use clap::Parser;
use forkgraph_vis::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        tracing::error!(error = %e, "forkgraph failed");
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

/// Initialize logging with tracing. Logs go to stderr so stdout stays JSON.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "forkgraph=debug,forkgraph_vis=debug,forkgraph_layout=debug,forkgraph_chain=debug"
    } else {
        "forkgraph=info,forkgraph_vis=info,forkgraph_layout=warn,forkgraph_chain=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
