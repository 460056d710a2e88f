//! Holobot battle driver.
//!
//! Runs battles from the roster in a data directory.
//!
//! ```bash
//! holobot simulate Ace Kuma --seed 7 --context league
//! holobot step Ace Kuma --rounds 3 -a special -b hack:heal --save pair.json
//! holobot step Ace Kuma --rounds 3 --resume pair.json
//! holobot roster
//! ```

mod commands;
mod config;
mod output;
mod script;

use anyhow::Result;
use clap::Parser;
use commands::{RosterList, Simulate, Step};
use tracing_subscriber::EnvFilter;

/// Holobot battle engine driver
#[derive(Parser)]
#[command(name = "holobot")]
#[command(about = "Resolve Holobot battles from roster data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a battle to completion and print the result
    Simulate(Simulate),

    /// Resolve a battle round by round with scripted commands
    Step(Step),

    /// List the Holobots in the roster
    Roster(RosterList),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for HOLOBOT_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();
    let config = config::CliConfig::from_env();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(&config),
        Command::Step(cmd) => cmd.execute(&config),
        Command::Roster(cmd) => cmd.execute(&config),
    }
}

/// Logs go to stderr so JSON on stdout stays machine-readable.
fn setup_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
