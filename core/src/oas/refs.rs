#![deny(missing_docs)]

//! # Reference Resolution
//!
//! Inlines `#/definitions/<id>` references against a [`Definitions`] map.
//!
//! Missing and cyclic references never abort resolution: they are replaced by
//! sentinel object schemas and reported as [`ResolutionGap`]s.

use crate::source::definitions::{definition_pointer_re, Definitions};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use std::fmt;

/// A reference that could not be expanded and was replaced by a sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionGap {
    /// The id was already being resolved higher up the chain.
    Cyclic(String),
    /// The id is not present in the definitions map.
    Missing(String),
}

impl fmt::Display for ResolutionGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionGap::Cyclic(id) => write!(f, "cyclic reference to #/definitions/{}", id),
            ResolutionGap::Missing(id) => {
                write!(f, "unresolved reference to #/definitions/{}", id)
            }
        }
    }
}

/// Resolves `schema`, discarding gap information.
pub fn resolve_schema(schema: &Value, definitions: &Definitions) -> Value {
    let mut gaps = Vec::new();
    resolve_schema_into(schema, definitions, &mut gaps)
}

/// Resolves `schema`, appending every sentinel substitution to `gaps`.
pub fn resolve_schema_into(
    schema: &Value,
    definitions: &Definitions,
    gaps: &mut Vec<ResolutionGap>,
) -> Value {
    resolve(schema, definitions, &BTreeSet::new(), gaps)
}

/// Core recursion. `visiting` holds the ids on the current chain only.
pub fn resolve(
    schema: &Value,
    definitions: &Definitions,
    visiting: &BTreeSet<String>,
    gaps: &mut Vec<ResolutionGap>,
) -> Value {
    match schema {
        Value::Object(obj) => {
            if let Some(id) = internal_ref_id(obj) {
                return resolve_reference(id, definitions, visiting, gaps);
            }
            let resolved: Map<String, Value> = obj
                .iter()
                .map(|(k, v)| (k.clone(), resolve(v, definitions, visiting, gaps)))
                .collect();
            Value::Object(resolved)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve(item, definitions, visiting, gaps))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn resolve_reference(
    id: &str,
    definitions: &Definitions,
    visiting: &BTreeSet<String>,
    gaps: &mut Vec<ResolutionGap>,
) -> Value {
    if visiting.contains(id) {
        let gap = ResolutionGap::Cyclic(id.to_string());
        let sentinel = sentinel(&gap);
        gaps.push(gap);
        return sentinel;
    }

    let Some(fragment) = definitions.get(id) else {
        let gap = ResolutionGap::Missing(id.to_string());
        let sentinel = sentinel(&gap);
        gaps.push(gap);
        return sentinel;
    };

    let mut chain = visiting.clone();
    chain.insert(id.to_string());
    resolve(fragment, definitions, &chain, gaps)
}

fn sentinel(gap: &ResolutionGap) -> Value {
    json!({
        "type": "object",
        "description": gap.to_string(),
    })
}

/// Extracts `<id>` from `{"$ref": "#/definitions/<id>"}`.
fn internal_ref_id(obj: &Map<String, Value>) -> Option<&str> {
    let reference = obj.get("$ref")?.as_str()?;
    definition_pointer_re()
        .captures(reference)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
