// =============================================================================
// Quantum Scheduling Simulator - Binary Entry Point
// =============================================================================
// Table of Contents:
//   1. Args - Command-line surface
//   2. main - Parses args, configures tracing, runs the driver
// =============================================================================
// Purpose: Thin wrapper handing a command-stream file to the driver loop.
//          Carries no scheduling invariants; all engine behavior lives in
//          sim-core and sim-render.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

// =============================================================================
// 1. Args - Command-line surface
// =============================================================================

/// Discrete-event OS scheduling simulator.
#[derive(Parser, Debug)]
#[command(name = "sim-cli")]
#[command(about = "Replays a command stream against the scheduling simulator")]
struct Args {
    /// Path to the command-record input file.
    input: PathBuf,

    /// Verbose logging (per-event diagnostics at DEBUG level).
    #[arg(short, long)]
    verbose: bool,
}

// =============================================================================
// 2. main - Parses args, configures tracing, runs the driver
// =============================================================================

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    info!(input = %args.input.display(), "starting simulation");

    if let Err(err) = sim_cli::driver::Driver::run(&args.input) {
        tracing::error!(%err, "simulation terminated with a fatal error");
        std::process::exit(1);
    }

    info!("simulation complete");
    Ok(())
}
