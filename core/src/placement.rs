#![deny(missing_docs)]

//! # Placement
//!
//! Deterministic, filesystem-safe output paths for generated documents:
//! `<group>/<tag segments>/<method>-<path slug>-<operationId>-<endpoint id>.json`.
//!
//! Tag names and titles are free-form text from the source system, so every
//! segment is sanitized for the most restrictive common filesystem.

use crate::oas::document::OperationPlan;
use crate::oas::naming::slugify;
use crate::source::Endpoint;
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Maximum length (in characters) of one path segment.
pub const MAX_SEGMENT_LEN: usize = 120;

/// Extension of generated documents.
pub const DOCUMENT_EXTENSION: &str = "json";

/// Makes `input` safe to use as a single file or directory name.
pub fn sanitize_path_part(input: &str) -> String {
    static ILLEGAL_RE: OnceLock<Regex> = OnceLock::new();
    static SPACE_RE: OnceLock<Regex> = OnceLock::new();
    let illegal_re =
        ILLEGAL_RE.get_or_init(|| Regex::new(r#"[<>:"/\\|?*]+"#).expect("Invalid regex"));
    let space_re = SPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex"));

    let replaced = illegal_re.replace_all(input.trim(), "-");
    let collapsed = space_re.replace_all(&replaced, " ");
    let cleaned = collapsed.trim_end_matches('.').trim();
    cleaned.chars().take(MAX_SEGMENT_LEN).collect()
}

/// Sanitized directory segments for a tag. Never empty.
pub fn tag_segments(tag: &str) -> Vec<String> {
    let segments: Vec<String> = tag
        .split('/')
        .map(sanitize_path_part)
        .filter(|s| !s.is_empty())
        .collect();
    if segments.is_empty() {
        vec!["default".to_string()]
    } else {
        segments
    }
}

/// File name for a document, keeping the `-<endpoint id>` suffix intact.
pub fn document_file_name(method: &str, path: &str, operation_id: &str, endpoint_id: i64) -> String {
    let suffix = format!("-{}", endpoint_id);
    let stem = format!("{}-{}-{}", method, slugify(path), operation_id);

    let mut name = sanitize_path_part(&format!("{}{}", stem, suffix));
    if !name.ends_with(&suffix) {
        // Truncation ate the id: shorten the stem instead.
        let budget = MAX_SEGMENT_LEN.saturating_sub(suffix.chars().count());
        let short: String = sanitize_path_part(&stem).chars().take(budget).collect();
        name = format!("{}{}", short.trim_end_matches(['.', ' ']), suffix);
    }
    format!("{}.{}", name, DOCUMENT_EXTENSION)
}

/// Relative output path of the document for `endpoint`.
pub fn document_path(endpoint: &Endpoint, plan: &OperationPlan) -> PathBuf {
    let mut path = PathBuf::from(plan.group.as_str());
    let first_tag = plan.tags.first().map(String::as_str).unwrap_or("default");
    for segment in tag_segments(first_tag) {
        path.push(segment);
    }
    path.push(document_file_name(
        &plan.method,
        &endpoint.path,
        &plan.operation_id,
        endpoint.id,
    ));
    path
}
