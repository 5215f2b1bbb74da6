#![deny(missing_docs)]

//! # oasdoc CLI
//!
//! Build-time tooling for the documentation site.
//!
//! Supported Commands:
//! - `generate`: API export -> one OpenAPI 3.1 document per endpoint.
//! - `repair`: Fix stale document references in translated pages.

use crate::error::CliResult;
use clap::{Parser, Subcommand};
use tracing::{info, Level};

mod error;
mod generate;
#[cfg(feature = "client")]
mod http;
mod repair;

/// Default export location of the API project.
pub(crate) const DEFAULT_SOURCE_URL: &str =
    "https://api.apifox.com/api/v1/projects/7484041/http-apis";

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI documentation build tooling")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Regenerate per-endpoint OpenAPI documents from the API export.
    Generate(generate::GenerateArgs),
    /// Repair stale document references in documentation pages.
    Repair(repair::RepairArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Generate(args) => {
            let summary = generate::execute(args)?;
            info!(
                "Done: {} documents, {} definitions, {} unresolved references",
                summary.written, summary.definitions, summary.resolution_gaps
            );
        }
        Commands::Repair(args) => {
            let reports = repair::execute(args)?;
            let fixed: usize = reports.iter().map(|r| r.fixed_refs).sum();
            let unresolved: usize = reports.iter().map(|r| r.unresolved_refs).sum();
            info!("Done: {} references fixed, {} unresolved", fixed, unresolved);
        }
    }

    Ok(())
}
