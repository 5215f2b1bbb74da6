#![deny(missing_docs)]

//! # Response Synthesis
//!
//! Builds the `responses` map. The result is never empty: OpenAPI requires at
//! least one response, so a bare `200 OK` is synthesized when none is declared.

use crate::oas::body::DEFAULT_MEDIA_TYPE;
use crate::oas::refs::{resolve_schema_into, ResolutionGap};
use crate::source::models::{non_empty, ResponseSpec};
use crate::source::Definitions;
use serde_json::{json, Map, Value};

/// Builds a single response object.
pub fn build_response(
    response: &ResponseSpec,
    definitions: &Definitions,
    gaps: &mut Vec<ResolutionGap>,
) -> Value {
    let description = non_empty(response.description.as_ref())
        .or_else(|| non_empty(response.name.as_ref()))
        .unwrap_or("Response");

    let no_content = response
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.eq_ignore_ascii_case("nocontent"));

    match &response.json_schema {
        Some(schema) if !no_content => {
            let media_type = non_empty(response.media_type.as_ref()).unwrap_or(DEFAULT_MEDIA_TYPE);
            let mut content = Map::new();
            content.insert(
                media_type.to_string(),
                json!({ "schema": resolve_schema_into(schema, definitions, gaps) }),
            );
            json!({
                "description": description,
                "content": content,
            })
        }
        _ => json!({ "description": description }),
    }
}

/// Builds the `responses` map keyed by status code, in declaration order.
pub fn build_responses(
    responses: &[ResponseSpec],
    definitions: &Definitions,
    gaps: &mut Vec<ResolutionGap>,
) -> Map<String, Value> {
    let mut out = Map::new();
    for response in responses {
        out.insert(
            response.code.to_string(),
            build_response(response, definitions, gaps),
        );
    }

    if out.is_empty() {
        out.insert("200".into(), json!({ "description": "OK" }));
    }
    out
}
