//! CLI entry point: assemble tiles around a simulated moving point

use chunkweave::io::cli::{Cli, SimulationRunner};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> chunkweave::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let summary = SimulationRunner::new(cli).run()?;
    info!("Layout written to {}", summary.output.display());
    if let Some(path) = &summary.visualization {
        info!("Animation written to {}", path.display());
    }
    Ok(())
}
