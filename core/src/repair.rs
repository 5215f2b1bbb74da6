#![deny(missing_docs)]

//! # Reference Repair
//!
//! Documentation pages embed generated documents as
//! `document={"openapi/generated/<group>/<tag>/<file>.json"}`. After a
//! regeneration (or a translation copied from another locale) some of those
//! paths no longer exist. This pass rewrites a stale path when exactly one
//! generated file carries the same basename, and refuses to guess otherwise.
//!
//! Re-running the pass after a successful repair changes nothing.

use crate::error::{AppError, AppResult};
use crate::placement::DOCUMENT_EXTENSION;
use indexmap::IndexMap;
use regex::Regex;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Extension of documentation source files.
pub const PAGE_EXTENSION: &str = "mdx";

/// Where the repair pass looks.
#[derive(Debug, Clone)]
pub struct RepairConfig {
    /// Directory all references are relative to (the site root).
    pub project_root: PathBuf,
    /// Generated output, relative to `project_root`, POSIX separators.
    pub generated_dir: String,
    /// Documentation tree, relative to `project_root`.
    pub docs_dir: PathBuf,
    /// Sub-directory inside each locale holding API pages; empty for the whole locale.
    pub section: String,
    /// Locales processed, in order.
    pub locales: Vec<String>,
    /// Report without rewriting files.
    pub dry_run: bool,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            generated_dir: "openapi/generated".to_string(),
            docs_dir: PathBuf::from("content/docs"),
            section: "api".to_string(),
            locales: vec!["en".to_string(), "ja".to_string()],
            dry_run: false,
        }
    }
}

/// Per-locale outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleReport {
    /// Locale code.
    pub locale: String,
    /// Pages found.
    pub scanned: usize,
    /// Pages rewritten (or that would be, in dry-run mode).
    pub changed: usize,
    /// Stale references replaced.
    pub fixed_refs: usize,
    /// Stale references left alone (no or several candidates).
    pub unresolved_refs: usize,
}

/// Generated documents indexed by basename.
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    by_name: IndexMap<String, Vec<String>>,
}

impl FileIndex {
    /// Scans `<project_root>/<generated_dir>` for generated documents.
    ///
    /// A missing or unreadable directory yields an empty (or partial) index.
    pub fn build(project_root: &Path, generated_dir: &str) -> Self {
        let mut index = Self::default();
        let root = project_root.join(generated_dir);
        for path in walk_files(&root, DOCUMENT_EXTENSION) {
            let (Some(name), Some(rel)) = (
                path.file_name().map(|n| n.to_string_lossy().into_owned()),
                to_posix_relative(&path, project_root),
            ) else {
                continue;
            };
            index.by_name.entry(name).or_default().push(rel);
        }
        index
    }

    /// Candidate paths for a basename.
    pub fn candidates(&self, basename: &str) -> &[String] {
        self.by_name.get(basename).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct basenames.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// True when no document was found.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Matches `document={"<generated_dir>/....json"}` and captures the path.
pub fn reference_pattern(generated_dir: &str) -> AppResult<Regex> {
    let prefix = generated_dir.trim_start_matches("./").trim_end_matches('/');
    Regex::new(&format!(
        r#"document=\{{"({}/[^"]+?\.json)"\}}"#,
        regex::escape(prefix)
    ))
    .map_err(|e| AppError::General(format!("Invalid reference pattern: {}", e)))
}

/// Distinct document references in `source` with their occurrence counts,
/// in order of first appearance.
pub fn extract_references(source: &str, pattern: &Regex) -> IndexMap<String, usize> {
    let mut references = IndexMap::new();
    for caps in pattern.captures_iter(source) {
        if let Some(m) = caps.get(1) {
            *references.entry(m.as_str().to_string()).or_insert(0) += 1;
        }
    }
    references
}

/// Runs the repair over every configured locale.
pub fn repair(config: &RepairConfig) -> AppResult<Vec<LocaleReport>> {
    let index = FileIndex::build(&config.project_root, &config.generated_dir);
    debug!("Indexed {} generated document names", index.len());
    let pattern = reference_pattern(&config.generated_dir)?;

    let mut reports = Vec::new();
    for locale in &config.locales {
        let report = repair_locale(config, locale, &index, &pattern)?;
        info!(
            "[repair] {}: scanned={}, changed={}, fixedRefs={}, unresolvedRefs={}",
            report.locale, report.scanned, report.changed, report.fixed_refs, report.unresolved_refs
        );
        reports.push(report);
    }
    Ok(reports)
}

/// Repairs the pages of one locale.
pub fn repair_locale(
    config: &RepairConfig,
    locale: &str,
    index: &FileIndex,
    pattern: &Regex,
) -> AppResult<LocaleReport> {
    let mut root = config.project_root.join(&config.docs_dir).join(locale);
    if !config.section.is_empty() {
        root.push(&config.section);
    }

    let pages = walk_files(&root, PAGE_EXTENSION);
    let mut report = LocaleReport {
        locale: locale.to_string(),
        scanned: pages.len(),
        ..LocaleReport::default()
    };

    for page in &pages {
        let original = match read_page(page) {
            Some(content) => content,
            None => continue,
        };

        let mut next = original.clone();
        for (reference, occurrences) in extract_references(&original, pattern) {
            if reference_exists(&config.project_root, &reference) {
                continue;
            }

            let basename = reference.rsplit('/').next().unwrap_or(&reference);
            match index.candidates(basename) {
                [replacement] => {
                    next = next.replace(
                        &format!("document={{\"{}\"}}", reference),
                        &format!("document={{\"{}\"}}", replacement),
                    );
                    report.fixed_refs += occurrences;
                    debug!("{:?}: {} -> {}", page, reference, replacement);
                }
                [] => {
                    report.unresolved_refs += occurrences;
                    warn!("{:?}: no generated document named {} ({})", page, basename, reference);
                }
                many => {
                    report.unresolved_refs += occurrences;
                    warn!(
                        "{:?}: {} is ambiguous ({} candidates), left unchanged",
                        page,
                        reference,
                        many.len()
                    );
                }
            }
        }

        if next != original {
            report.changed += 1;
            if !config.dry_run {
                fs::write(page, next)
                    .map_err(|e| AppError::General(format!("Failed to write {:?}: {}", page, e)))?;
            }
        }
    }

    Ok(report)
}

/// Page content, or `None` (with a warning) when it cannot be read as UTF-8.
fn read_page(page: &Path) -> Option<String> {
    let bytes = match fs::read(page) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("{:?}: unreadable, skipped: {}", page, e);
            return None;
        }
    };
    match String::from_utf8(bytes) {
        Ok(content) => Some(content),
        Err(e) => {
            warn!("{:?}: not valid UTF-8, skipped: {}", page, e.utf8_error());
            None
        }
    }
}

fn reference_exists(project_root: &Path, reference: &str) -> bool {
    let mut path = project_root.to_path_buf();
    path.extend(reference.split('/').filter(|s| !s.is_empty()));
    path.is_file()
}

/// Files under `root` with the given extension (case-insensitive), sorted.
/// Unreadable entries are skipped.
fn walk_files(root: &Path, extension: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                debug!("Skipping unreadable entry under {:?}: {}", root, e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
        })
        .collect()
}

fn to_posix_relative(path: &Path, base: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}
