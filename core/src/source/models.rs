#![deny(missing_docs)]

//! # Endpoint Records
//!
//! Typed view of one entry of the API-export `data` array.
//!
//! Every field the export may omit is optional here; JSON Schema fragments stay
//! as raw `serde_json::Value` because they are resolved, not interpreted.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// One operation exported by the source system.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Numeric identifier, unique within the export.
    pub id: i64,
    /// Display name (used as title and summary).
    #[serde(default)]
    pub name: Option<String>,
    /// Long-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Preferred operation identifier, if the author set one.
    #[serde(default)]
    pub operation_id: Option<String>,
    /// HTTP method in any case, e.g. `POST`.
    #[serde(default)]
    pub method: Option<String>,
    /// URL path template, e.g. `/v1/users/{id}`.
    pub path: String,
    /// Tags; the first one drives the output directory.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Folder/module the endpoint belongs to in the source system.
    #[serde(default)]
    pub module_id: Option<i64>,
    /// Request body descriptor.
    #[serde(default)]
    pub request_body: Option<RequestBodySpec>,
    /// Parameter groups.
    #[serde(default)]
    pub parameters: Option<ParameterSets>,
    /// Declared responses.
    #[serde(default)]
    pub responses: Option<Vec<ResponseSpec>>,
    /// Authentication descriptor.
    #[serde(default)]
    pub auth: Option<AuthSpec>,
}

impl Endpoint {
    /// Lowercased, trimmed HTTP method; `get` when the export left it empty.
    pub fn normalized_method(&self) -> String {
        match self.method.as_deref().map(str::trim) {
            Some(m) if !m.is_empty() => m.to_lowercase(),
            _ => "get".to_string(),
        }
    }

    /// Tags with blanks replaced by `default`; never empty.
    pub fn effective_tags(&self) -> Vec<String> {
        match self.tags.as_deref() {
            Some(tags) if !tags.is_empty() => tags
                .iter()
                .map(|t| {
                    if t.is_empty() {
                        "default".to_string()
                    } else {
                        t.clone()
                    }
                })
                .collect(),
            _ => vec!["default".to_string()],
        }
    }

    /// Declared responses, empty when the field is absent.
    pub fn declared_responses(&self) -> &[ResponseSpec] {
        self.responses.as_deref().unwrap_or(&[])
    }
}

/// A single parameter as exported.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Parameter {
    /// Parameter name; nameless entries are skipped during synthesis.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the parameter is mandatory.
    #[serde(default)]
    pub required: Option<bool>,
    /// Human description.
    #[serde(default)]
    pub description: Option<String>,
    /// Explicit JSON Schema.
    #[serde(default)]
    pub schema: Option<Value>,
    /// Primitive type hint (`string`, `integer`, `file`, ...).
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
}

/// Parameters grouped by location.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParameterSets {
    /// Path template parameters.
    #[serde(default)]
    pub path: Option<Vec<Parameter>>,
    /// Query string parameters.
    #[serde(default)]
    pub query: Option<Vec<Parameter>>,
    /// Request headers.
    #[serde(default)]
    pub header: Option<Vec<Parameter>>,
    /// Cookies.
    #[serde(default)]
    pub cookie: Option<Vec<Parameter>>,
}

/// Request body descriptor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBodySpec {
    /// `none`, a media type such as `multipart/form-data`, or a short hint.
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
    /// Form fields, used when no `json_schema` is given.
    #[serde(default)]
    pub parameters: Option<Vec<Parameter>>,
    /// Full body schema.
    #[serde(default)]
    pub json_schema: Option<Value>,
    /// Explicit media type.
    #[serde(default)]
    pub media_type: Option<String>,
    /// Whether a body must be sent.
    #[serde(default)]
    pub required: Option<bool>,
    /// Human description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Response status code as exported: usually a number, sometimes text (`default`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResponseCode {
    /// Numeric code such as `200`.
    Number(u64),
    /// Textual code such as `2XX` or `default`.
    Text(String),
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCode::Number(n) => write!(f, "{}", n),
            ResponseCode::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One declared response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSpec {
    /// Status code.
    pub code: ResponseCode,
    /// Short name, used when `description` is missing.
    #[serde(default)]
    pub name: Option<String>,
    /// Human description.
    #[serde(default)]
    pub description: Option<String>,
    /// `json`, `noContent`, ...
    #[serde(default)]
    pub content_type: Option<String>,
    /// Explicit media type.
    #[serde(default)]
    pub media_type: Option<String>,
    /// Body schema.
    #[serde(default)]
    pub json_schema: Option<Value>,
}

/// Authentication descriptor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuthSpec {
    /// `bearer`, `basic`, `noauth`, ...
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
}

/// Returns the string when present and non-empty.
pub(crate) fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}
