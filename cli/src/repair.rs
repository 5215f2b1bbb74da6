#![deny(missing_docs)]

//! # Repair Command
//!
//! Rewrites stale `document={"..."}` references in translated pages.

use crate::error::CliResult;
use oasdoc_core::{repair, LocaleReport, RepairConfig};
use std::path::PathBuf;

/// Arguments for the repair command.
#[derive(clap::Args, Debug, Clone)]
pub struct RepairArgs {
    /// Site root; references are relative to it.
    #[clap(long, default_value = ".")]
    pub root: PathBuf,

    /// Generated documents directory, relative to the root.
    #[clap(long, default_value = "openapi/generated")]
    pub generated_dir: String,

    /// Documentation tree, relative to the root.
    #[clap(long, default_value = "content/docs")]
    pub docs_dir: PathBuf,

    /// Folder inside each locale holding API pages.
    #[clap(long, default_value = "api")]
    pub section: String,

    /// Locales to repair (repeatable).
    #[clap(long = "locale", default_values_t = ["en".to_string(), "ja".to_string()])]
    pub locales: Vec<String>,

    /// Report what would change without writing.
    #[clap(long)]
    pub dry_run: bool,
}

impl From<&RepairArgs> for RepairConfig {
    fn from(args: &RepairArgs) -> Self {
        RepairConfig {
            project_root: args.root.clone(),
            generated_dir: args.generated_dir.clone(),
            docs_dir: args.docs_dir.clone(),
            section: args.section.clone(),
            locales: args.locales.clone(),
            dry_run: args.dry_run,
        }
    }
}

/// Executes the repair pass.
pub fn execute(args: &RepairArgs) -> CliResult<Vec<LocaleReport>> {
    Ok(repair(&RepairConfig::from(args))?)
}
