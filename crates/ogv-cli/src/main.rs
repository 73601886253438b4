//! # ogv CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// OG1 metadata vocabulary validator.
///
/// Validates glider deployment metadata against the NERC Vocabulary
/// Server, applies limited auto-corrections, and writes corrected
/// documents plus a run log.
#[derive(Parser, Debug)]
#[command(name = "ogv", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate a directory of deployment documents.
    Validate(ogv_cli::validate::ValidateArgs),
    /// Look a term up in a vocabulary collection.
    Lookup(ogv_cli::lookup::LookupArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => ogv_cli::validate::run(args),
        Commands::Lookup(args) => ogv_cli::lookup::run(args),
    }
}
