#![deny(missing_docs)]

//! # Generation Pipeline
//!
//! Drives ingestion -> synthesis -> placement -> write.
//!
//! 1. **Clean**: the output root is removed and recreated so no stale document survives.
//! 2. **Definitions**: loaded best-effort; failure only means fewer references can be inlined.
//! 3. **Endpoints**: fetched and validated; any failure aborts the run.
//! 4. **Documents**: one file per endpoint, processed in source order so that the
//!    first endpoint claiming an operation id keeps it bare.

use crate::error::{AppError, AppResult};
use crate::oas::document::{build_document, plan_operation};
use crate::oas::naming::{ApiGroup, OperationIds};
use crate::placement::document_path;
use crate::source::{fetch_endpoints, load_definitions, Definitions, DefinitionsLoad, EndpointSource};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default output root.
pub const DEFAULT_OUT_DIR: &str = "./openapi/generated";

/// Default location of the project export holding schema definitions.
pub const DEFAULT_DEFINITIONS_FILE: &str = "./openapi/NewAPI.apifox.json";

/// Where the pipeline reads and writes.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Output root; wiped at the start of every run.
    pub out_dir: PathBuf,
    /// Optional schema-definitions export.
    pub definitions_file: PathBuf,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            definitions_file: PathBuf::from(DEFAULT_DEFINITIONS_FILE),
        }
    }
}

/// End-of-run report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Documents written.
    pub written: usize,
    /// Documents written per group.
    pub per_group: BTreeMap<ApiGroup, usize>,
    /// Definitions available for resolution.
    pub definitions: usize,
    /// Sentinel schemas emitted across all documents.
    pub resolution_gaps: usize,
    /// Relative paths of the written documents, in source order.
    pub files: Vec<PathBuf>,
}

/// Runs the whole generation. Returns the summary on success.
///
/// On an ingestion failure the output root has already been cleared and is left empty.
pub fn run_generation(
    config: &GenerationConfig,
    source: &dyn EndpointSource,
) -> AppResult<GenerationSummary> {
    reset_output_dir(&config.out_dir)?;

    let definitions = load_and_report_definitions(&config.definitions_file);
    let endpoints = fetch_endpoints(source)?;

    let mut summary = GenerationSummary {
        definitions: definitions.len(),
        ..GenerationSummary::default()
    };
    let mut operation_ids = OperationIds::new();

    for endpoint in &endpoints {
        let plan = plan_operation(endpoint, &mut operation_ids);
        let rel_path = document_path(endpoint, &plan);
        let synthesized = build_document(endpoint, &plan, &definitions);

        for gap in &synthesized.gaps {
            warn!("Endpoint {} ({}): {}", endpoint.id, plan.operation_id, gap);
        }

        let out_file = config.out_dir.join(&rel_path);
        if let Some(parent) = out_file.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::General(format!("Failed to create {:?}: {}", parent, e))
            })?;
        }
        let json = serde_json::to_string_pretty(&synthesized.document)?;
        fs::write(&out_file, json)
            .map_err(|e| AppError::General(format!("Failed to write {:?}: {}", out_file, e)))?;
        debug!("Endpoint {} -> {:?}", endpoint.id, rel_path);

        summary.written += 1;
        *summary.per_group.entry(plan.group).or_insert(0) += 1;
        summary.resolution_gaps += synthesized.gaps.len();
        summary.files.push(rel_path);
    }

    info!(
        "Generated {} per-endpoint OpenAPI files into {:?}",
        summary.written, config.out_dir
    );
    for (group, count) in &summary.per_group {
        info!("  {}: {}", group, count);
    }
    if summary.resolution_gaps > 0 {
        warn!(
            "{} schema references could not be expanded (see warnings above)",
            summary.resolution_gaps
        );
    }

    Ok(summary)
}

fn reset_output_dir(out_dir: &Path) -> AppResult<()> {
    match fs::remove_dir_all(out_dir) {
        Ok(()) => debug!("Removed previous output {:?}", out_dir),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(AppError::General(format!(
                "Failed to clear output directory {:?}: {}",
                out_dir, e
            )))
        }
    }
    fs::create_dir_all(out_dir).map_err(|e| {
        AppError::General(format!("Failed to create output directory {:?}: {}", out_dir, e))
    })
}

fn load_and_report_definitions(path: &Path) -> Definitions {
    let outcome = load_definitions(path);
    match &outcome {
        DefinitionsLoad::Missing { path } => {
            warn!("Schema definitions file not found: {:?}", path)
        }
        DefinitionsLoad::Invalid { path, reason } => {
            warn!("Schema definitions file {:?} is unusable: {}", path, reason)
        }
        DefinitionsLoad::Loaded { path, definitions } if definitions.is_empty() => {
            warn!("No schema definitions found in {:?}", path)
        }
        DefinitionsLoad::Loaded { path, definitions } => {
            info!("Loaded {} schema definitions from {:?}", definitions.len(), path)
        }
    }
    outcome.into_definitions()
}
