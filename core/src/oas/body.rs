#![deny(missing_docs)]

//! # Request Body Synthesis
//!
//! Turns the exported body descriptor into an OpenAPI `requestBody`.
//! Form and multipart bodies are usually exported as a field list rather than a
//! schema; those are folded into an object schema here.

use crate::oas::params::parameter_schema;
use crate::oas::refs::{resolve_schema_into, ResolutionGap};
use crate::source::models::{non_empty, Parameter, RequestBodySpec};
use crate::source::Definitions;
use serde_json::{json, Map, Value};

/// Media type used when the export gives no usable hint.
pub const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// Picks the media type: explicit `mediaType`, else a `type` containing `/`, else JSON.
pub fn body_media_type(body: &RequestBodySpec) -> String {
    if let Some(media) = non_empty(body.media_type.as_ref()) {
        return media.to_string();
    }
    match non_empty(body.ty.as_ref()) {
        Some(ty) if ty.contains('/') => ty.to_string(),
        _ => DEFAULT_MEDIA_TYPE.to_string(),
    }
}

/// Builds the `requestBody` object, or `None` when the endpoint sends no body.
pub fn build_request_body(
    body: Option<&RequestBodySpec>,
    definitions: &Definitions,
    gaps: &mut Vec<ResolutionGap>,
) -> Option<Value> {
    let body = body?;
    let ty = non_empty(body.ty.as_ref())?;
    if ty.eq_ignore_ascii_case("none") {
        return None;
    }

    let media_type = body_media_type(body);
    let form_fields = body.parameters.as_deref().filter(|p| !p.is_empty());

    let schema = match (&body.json_schema, form_fields) {
        (Some(schema), _) if schema.is_object() => resolve_schema_into(schema, definitions, gaps),
        (_, Some(fields)) => form_schema(fields, definitions, gaps),
        _ => json!({ "type": "object" }),
    };

    let mut obj = Map::new();
    obj.insert("required".into(), json!(body.required.unwrap_or(false)));
    if let Some(desc) = non_empty(body.description.as_ref()) {
        obj.insert("description".into(), json!(desc));
    }
    let mut content = Map::new();
    content.insert(media_type, json!({ "schema": schema }));
    obj.insert("content".into(), Value::Object(content));
    Some(Value::Object(obj))
}

/// Object schema with one property per named field.
fn form_schema(
    fields: &[Parameter],
    definitions: &Definitions,
    gaps: &mut Vec<ResolutionGap>,
) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in fields {
        let Some(name) = non_empty(field.name.as_ref()) else {
            continue;
        };

        let mut prop = if field.schema.is_none() && field.ty.as_deref() == Some("file") {
            json!({ "type": "string", "format": "binary" })
        } else {
            parameter_schema(field, definitions, gaps)
        };
        if let (Some(desc), Some(prop_obj)) =
            (non_empty(field.description.as_ref()), prop.as_object_mut())
        {
            prop_obj.insert("description".into(), json!(desc));
        }
        properties.insert(name.to_string(), prop);

        if field.required.unwrap_or(false) {
            required.push(json!(name));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".into(), json!("object"));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".into(), Value::Array(required));
    }
    Value::Object(schema)
}
