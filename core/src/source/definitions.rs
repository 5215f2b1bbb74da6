#![deny(missing_docs)]

//! # Schema Definitions
//!
//! Extracts `#/definitions/<id>` schema fragments from a project export.
//!
//! The export is optional: a missing or malformed file degrades to an empty
//! map, but the outcome keeps track of which branch was taken.

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Definition id → schema fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definitions(IndexMap<String, Value>);

impl Definitions {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fragment under `id` (digits only, no pointer prefix).
    pub fn insert(&mut self, id: impl Into<String>, schema: Value) {
        self.0.insert(id.into(), schema);
    }

    /// Looks a fragment up by id.
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.0.get(id)
    }

    /// Number of known definitions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no definition is known.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Definitions {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Outcome of loading the optional definitions export.
#[derive(Debug)]
pub enum DefinitionsLoad {
    /// No file at the configured location.
    Missing {
        /// Location that was probed.
        path: PathBuf,
    },
    /// The file exists but could not be read or understood.
    Invalid {
        /// Location of the file.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
    /// The file was parsed (possibly yielding zero definitions).
    Loaded {
        /// Location of the file.
        path: PathBuf,
        /// Extracted definitions.
        definitions: Definitions,
    },
}

impl DefinitionsLoad {
    /// Definitions to use for resolution; empty unless `Loaded`.
    pub fn into_definitions(self) -> Definitions {
        match self {
            DefinitionsLoad::Loaded { definitions, .. } => definitions,
            DefinitionsLoad::Missing { .. } | DefinitionsLoad::Invalid { .. } => {
                Definitions::new()
            }
        }
    }
}

/// Matches the internal reference convention and captures the id.
pub(crate) fn definition_pointer_re() -> &'static Regex {
    static POINTER_RE: OnceLock<Regex> = OnceLock::new();
    POINTER_RE.get_or_init(|| Regex::new(r"^#/definitions/(\d+)$").expect("Invalid regex"))
}

/// Reads and parses the export at `path`. Never fails; see [`DefinitionsLoad`].
pub fn load_definitions(path: &Path) -> DefinitionsLoad {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return DefinitionsLoad::Missing {
                path: path.to_path_buf(),
            }
        }
        Err(e) => {
            return DefinitionsLoad::Invalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    };

    let project: Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            return DefinitionsLoad::Invalid {
                path: path.to_path_buf(),
                reason: format!("not valid JSON: {}", e),
            }
        }
    };

    match extract_definitions(&project) {
        Some(definitions) => DefinitionsLoad::Loaded {
            path: path.to_path_buf(),
            definitions,
        },
        None => DefinitionsLoad::Invalid {
            path: path.to_path_buf(),
            reason: "missing `schemaCollection` array".to_string(),
        },
    }
}

/// Walks `schemaCollection` (and nested `items`) collecting definitions.
///
/// Returns `None` when the root has no `schemaCollection` array.
pub fn extract_definitions(project: &Value) -> Option<Definitions> {
    let collection = project.get("schemaCollection")?.as_array()?;
    let mut definitions = Definitions::new();
    for node in collection {
        walk_node(node, &mut definitions);
    }
    Some(definitions)
}

fn walk_node(node: &Value, definitions: &mut Definitions) {
    let Some(obj) = node.as_object() else {
        return;
    };

    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| definition_pointer_re().captures(s))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    let schema = obj
        .get("schema")
        .and_then(|s| s.get("jsonSchema"))
        .filter(|s| s.is_object());

    if let (Some(id), Some(schema)) = (id, schema) {
        definitions.insert(id, schema.clone());
    }

    if let Some(items) = obj.get("items").and_then(Value::as_array) {
        for item in items {
            walk_node(item, definitions);
        }
    }
}
