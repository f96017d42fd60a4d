//! Phishguard CLI binary.

use clap::Parser;
use phishguard::cli::{args::PhishguardArgs, commands::execute_command};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command line arguments using clap
    let args = PhishguardArgs::parse();

    // Verbosity maps to the default log filter; RUST_LOG still wins.
    let default_level = match args.verbosity() {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Execute the command
    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
