#![deny(missing_docs)]

//! # Parameter Synthesis
//!
//! Maps exported parameter groups onto OpenAPI parameter objects.

use crate::oas::refs::{resolve_schema_into, ResolutionGap};
use crate::source::models::{non_empty, Parameter, ParameterSets};
use crate::source::Definitions;
use serde_json::{json, Map, Value};
use std::fmt;

/// Where a parameter is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    /// Path template placeholder.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
}

impl ParamLocation {
    /// The OpenAPI `in` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
            ParamLocation::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema of a parameter: explicit schema, else `{type: <hint>}`, else `{type: string}`.
pub(crate) fn parameter_schema(
    param: &Parameter,
    definitions: &Definitions,
    gaps: &mut Vec<ResolutionGap>,
) -> Value {
    match (&param.schema, non_empty(param.ty.as_ref())) {
        (Some(schema), _) => resolve_schema_into(schema, definitions, gaps),
        (None, Some(ty)) => json!({ "type": ty }),
        (None, None) => json!({ "type": "string" }),
    }
}

/// Builds one OpenAPI parameter object. Returns `None` for nameless entries.
pub fn build_parameter(
    param: &Parameter,
    location: ParamLocation,
    definitions: &Definitions,
    gaps: &mut Vec<ResolutionGap>,
) -> Option<Value> {
    let name = non_empty(param.name.as_ref())?;

    // Path parameters are always required in OpenAPI.
    let required = location == ParamLocation::Path || param.required.unwrap_or(false);

    let mut obj = Map::new();
    obj.insert("name".into(), json!(name));
    obj.insert("in".into(), json!(location.as_str()));
    obj.insert("required".into(), json!(required));
    if let Some(desc) = non_empty(param.description.as_ref()) {
        obj.insert("description".into(), json!(desc));
    }
    obj.insert(
        "schema".into(),
        parameter_schema(param, definitions, gaps),
    );
    Some(Value::Object(obj))
}

/// Builds the operation `parameters` array: path, query, header, cookie.
pub fn build_parameters(
    sets: Option<&ParameterSets>,
    endpoint_id: i64,
    definitions: &Definitions,
    gaps: &mut Vec<ResolutionGap>,
) -> Vec<Value> {
    let Some(sets) = sets else {
        return Vec::new();
    };

    let groups = [
        (ParamLocation::Path, &sets.path),
        (ParamLocation::Query, &sets.query),
        (ParamLocation::Header, &sets.header),
        (ParamLocation::Cookie, &sets.cookie),
    ];

    let mut out = Vec::new();
    for (location, params) in groups {
        for param in params.as_deref().unwrap_or(&[]) {
            match build_parameter(param, location, definitions, gaps) {
                Some(p) => out.push(p),
                None => tracing::warn!(
                    "Endpoint {}: skipping {} parameter without a name",
                    endpoint_id,
                    location
                ),
            }
        }
    }
    out
}
