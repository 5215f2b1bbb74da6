#![deny(missing_docs)]

//! # Generate Command
//!
//! Regenerates the per-endpoint OpenAPI documents.
//!
//! Every option can also be given through the environment, which is how the
//! site build invokes it.

use crate::error::CliResult;
use oasdoc_core::pipeline::{DEFAULT_DEFINITIONS_FILE, DEFAULT_OUT_DIR};
use oasdoc_core::{run_generation, EndpointSource, FileSource, GenerationConfig, GenerationSummary};
use std::path::PathBuf;

/// Arguments for the generate command.
///
/// Values are kept as raw strings: a blank or whitespace-only value (typically
/// an exported-but-empty environment variable) means "use the default".
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// URL of the endpoint export.
    #[clap(long, env = "HTTP_SOURCE_URL", default_value = crate::DEFAULT_SOURCE_URL)]
    pub source_url: Option<String>,

    /// Extra request headers for the export, as a JSON object.
    /// Example: `'{"Authorization": "Bearer ..."}'`
    #[clap(long, env = "HTTP_SOURCE_HEADERS")]
    pub source_headers: Option<String>,

    /// Read the endpoint export from a local file instead of the URL.
    #[clap(long, env = "HTTP_SOURCE_FILE")]
    pub source_file: Option<String>,

    /// Project export holding `#/definitions/<id>` schemas (optional).
    #[clap(long, env = "APIFOX_PROJECT_FILE", default_value = DEFAULT_DEFINITIONS_FILE)]
    pub definitions_file: Option<String>,

    /// Output root. Removed and recreated on every run.
    #[clap(long, env = "OPENAPI_OUT_DIR", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: Option<String>,
}

/// Trimmed value, or `None` when absent or blank.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl GenerateArgs {
    fn config(&self) -> GenerationConfig {
        GenerationConfig {
            out_dir: PathBuf::from(non_blank(self.out_dir.as_deref()).unwrap_or(DEFAULT_OUT_DIR)),
            definitions_file: PathBuf::from(
                non_blank(self.definitions_file.as_deref()).unwrap_or(DEFAULT_DEFINITIONS_FILE),
            ),
        }
    }

    /// Local file when configured, otherwise the HTTP export.
    fn source(&self) -> CliResult<Box<dyn EndpointSource>> {
        if let Some(file) = non_blank(self.source_file.as_deref()) {
            return Ok(Box::new(FileSource::new(file)));
        }
        let url = non_blank(self.source_url.as_deref()).unwrap_or(crate::DEFAULT_SOURCE_URL);
        http_source(url, self.source_headers.as_deref())
    }
}

#[cfg(feature = "client")]
fn http_source(url: &str, headers: Option<&str>) -> CliResult<Box<dyn EndpointSource>> {
    Ok(Box::new(crate::http::HttpSource::new(url, headers)?))
}

#[cfg(not(feature = "client"))]
fn http_source(url: &str, _headers: Option<&str>) -> CliResult<Box<dyn EndpointSource>> {
    Err(crate::error::CliError::Config(format!(
        "Built without the `client` feature; cannot fetch {}. Use --source-file.",
        url
    )))
}

/// Executes the generation.
pub fn execute(args: &GenerateArgs) -> CliResult<GenerationSummary> {
    let source = args.source()?;
    let summary = run_generation(&args.config(), source.as_ref())?;
    Ok(summary)
}
