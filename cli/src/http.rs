#![deny(missing_docs)]

//! # HTTP Endpoint Source
//!
//! Fetches the endpoint export over HTTP with `ureq`.

use crate::error::{CliError, CliResult};
use oasdoc_core::{AppError, AppResult, EndpointSource};
use std::collections::BTreeMap;
use url::Url;

/// Upper bound for the export body.
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Remote endpoint source.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
    headers: BTreeMap<String, String>,
}

impl HttpSource {
    /// Validates the URL and the optional JSON-encoded header map.
    pub fn new(url: &str, headers_json: Option<&str>) -> CliResult<Self> {
        let url = Url::parse(url.trim())
            .map_err(|e| CliError::Config(format!("Invalid source URL {:?}: {}", url, e)))?;
        let headers = match headers_json.map(str::trim).filter(|h| !h.is_empty()) {
            Some(raw) => parse_headers(raw)?,
            None => BTreeMap::new(),
        };
        Ok(Self { url, headers })
    }
}

/// Parses `{"Header": "value", ...}`.
pub fn parse_headers(raw: &str) -> CliResult<BTreeMap<String, String>> {
    serde_json::from_str(raw).map_err(|e| {
        CliError::Config(format!(
            "Source headers must be a JSON object of strings: {}",
            e
        ))
    })
}

impl EndpointSource for HttpSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    fn fetch(&self) -> AppResult<String> {
        let mut request = ureq::get(self.url.as_str());
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        // Statuses are checked below so every non-success code reads the same.
        let mut response = request
            .config()
            .http_status_as_error(false)
            .build()
            .call()
            .map_err(|e| AppError::Ingestion(format!("Failed to fetch {}: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(AppError::Ingestion(format!(
                "Endpoint source {} answered with status {}",
                self.url,
                response.status()
            )));
        }

        response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_string()
            .map_err(|e| AppError::Ingestion(format!("Failed to read body of {}: {}", self.url, e)))
    }
}
