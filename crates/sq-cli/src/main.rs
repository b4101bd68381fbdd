//! CLI driving the sequential list.
//!
//! # Usage
//!
//! ```bash
//! # Reference scenario: insert 1..=10, insert(3, 1), delete(3)
//! cargo run -p sq-cli -- scenario
//!
//! # Same scenario as JSON
//! cargo run -p sq-cli -- scenario --json
//!
//! # Seeded simulation run with aggressive invalid inputs
//! cargo run -p sq-cli -- simulate --seed 12345 --ops 5000 --faults aggressive
//! ```

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod scenario;
mod simulate;

#[derive(Debug, Parser)]
#[command(name = "sqlist", about = "Fixed-capacity sequential list driver", version)]
struct Args {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the reference insert/delete scenario on a 50-slot list
    Scenario {
        /// Print a JSON report instead of one line per step
        #[arg(long)]
        json: bool,
    },

    /// Run a seeded random operation sequence and check all invariants
    Simulate {
        /// DST seed (defaults to DST_SEED, else random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of operations (defaults to DST_ITERATIONS, else 1000)
        #[arg(short = 'n', long)]
        ops: Option<u64>,

        /// Invalid-input preset: none, default, aggressive
        #[arg(short, long, default_value = "default")]
        faults: String,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);

    match args.command {
        Command::Scenario { json } => scenario::run(json),
        Command::Simulate {
            seed,
            ops,
            faults,
            json,
        } => simulate::run(seed, ops, &faults, json),
    }
}

fn init_logger(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
