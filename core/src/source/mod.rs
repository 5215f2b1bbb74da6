#![deny(missing_docs)]

//! # Source Ingestion
//!
//! - **models**: typed endpoint records.
//! - **definitions**: optional schema-definitions export.
//!
//! The endpoint list arrives through an [`EndpointSource`]; the network
//! transport lives in the CLI so this crate stays free of I/O beyond the
//! filesystem.

pub mod definitions;
pub mod models;

pub use definitions::{extract_definitions, load_definitions, Definitions, DefinitionsLoad};
pub use models::{
    AuthSpec, Endpoint, Parameter, ParameterSets, RequestBodySpec, ResponseCode, ResponseSpec,
};

use crate::error::{AppError, AppResult};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Interface for obtaining the raw endpoint payload.
///
/// Abstracted so the orchestrator can be driven by an HTTP client, a local
/// file, or an in-memory payload in tests.
pub trait EndpointSource {
    /// Human-readable location used in log lines and errors.
    fn describe(&self) -> String;

    /// Returns the raw payload text.
    ///
    /// Transport failures and non-success statuses must surface as
    /// [`AppError::Ingestion`].
    fn fetch(&self) -> AppResult<String>;
}

/// Reads the endpoint payload from a local file.
#[derive(Debug, Clone)]
pub struct FileSource {
    /// Path to the JSON payload.
    pub path: PathBuf,
}

impl FileSource {
    /// Creates a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EndpointSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> AppResult<String> {
        fs::read_to_string(&self.path).map_err(|e| {
            AppError::Ingestion(format!("Failed to read {}: {}", self.path.display(), e))
        })
    }
}

/// In-memory payload, mostly useful for tests and embedding.
#[derive(Debug, Clone)]
pub struct StaticSource(pub String);

impl EndpointSource for StaticSource {
    fn describe(&self) -> String {
        "<inline payload>".to_string()
    }

    fn fetch(&self) -> AppResult<String> {
        Ok(self.0.clone())
    }
}

/// Validates the `{ success: true, data: [...] }` envelope and decodes every entry.
///
/// Any deviation is fatal: a partially understood export would produce
/// incorrect documents.
pub fn parse_endpoint_root(payload: &str) -> AppResult<Vec<Endpoint>> {
    let root: Value = serde_json::from_str(payload)
        .map_err(|e| AppError::Ingestion(format!("Endpoint payload is not valid JSON: {}", e)))?;

    if root.get("success").and_then(Value::as_bool) != Some(true) {
        return Err(AppError::Ingestion(
            "Invalid endpoint source: expected { success: true, data: [] }".into(),
        ));
    }

    let data = root.get("data").and_then(Value::as_array).ok_or_else(|| {
        AppError::Ingestion("Invalid endpoint source: `data` is not an array".into())
    })?;

    data.iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value::<Endpoint>(entry.clone()).map_err(|e| {
                AppError::Ingestion(format!("Endpoint #{} is malformed: {}", index, e))
            })
        })
        .collect()
}

/// Fetches from `source` and validates the payload.
pub fn fetch_endpoints(source: &dyn EndpointSource) -> AppResult<Vec<Endpoint>> {
    let payload = source.fetch()?;
    let endpoints = parse_endpoint_root(&payload)?;
    tracing::info!(
        "Fetched {} endpoints from {}",
        endpoints.len(),
        source.describe()
    );
    Ok(endpoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_valid_root() {
        let payload = r#"{"success": true, "data": [{"id": 1, "path": "/a"}, {"id": 2, "path": "/b", "method": "POST"}]}"#;
        let endpoints = parse_endpoint_root(payload).unwrap();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[1].normalized_method(), "post");
    }

    #[test]
    fn test_parse_rejects_unsuccessful_root() {
        let err = parse_endpoint_root(r#"{"success": false, "data": []}"#).unwrap_err();
        assert!(matches!(err, AppError::Ingestion(_)));
    }

    #[test]
    fn test_parse_rejects_non_array_data() {
        let err = parse_endpoint_root(r#"{"success": true, "data": {"id": 1}}"#).unwrap_err();
        assert!(format!("{}", err).contains("`data` is not an array"));
    }

    #[test]
    fn test_parse_rejects_malformed_entry() {
        let err =
            parse_endpoint_root(r#"{"success": true, "data": [{"id": 1, "path": "/a"}, {"id": "x"}]}"#)
                .unwrap_err();
        assert!(format!("{}", err).contains("Endpoint #1"));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = parse_endpoint_root("<html>").unwrap_err();
        assert!(matches!(err, AppError::Ingestion(_)));
    }

    #[test]
    fn test_file_source_missing_is_ingestion_error() {
        let dir = tempdir().unwrap();
        let source = FileSource::new(dir.path().join("nope.json"));
        assert!(matches!(source.fetch(), Err(AppError::Ingestion(_))));
    }

    #[test]
    fn test_fetch_endpoints_from_static_source() {
        let source = StaticSource(r#"{"success": true, "data": []}"#.to_string());
        assert!(fetch_endpoints(&source).unwrap().is_empty());
    }
}
