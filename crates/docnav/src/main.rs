//! docnav CLI - sidebar navigation checker.
//!
//! Provides commands for:
//! - `check`: Validate the navigation config and its content references
//! - `show`: Print the normalized navigation tree

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ShowArgs};
use output::Output;

/// docnav - Sidebar navigation checker.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the navigation config.
    Check(CheckArgs),
    /// Print the normalized navigation tree.
    Show(ShowArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Check(args) => args.verbose,
            Self::Show(args) => args.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Show(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
