#![deny(missing_docs)]

//! # Document Synthesis
//!
//! Assembles one self-contained OpenAPI 3.1 document per endpoint.
//!
//! Synthesis is split in two steps so the orchestrator controls ordering:
//! [`plan_operation`] claims the operation id from the run-wide accumulator,
//! [`build_document`] is a pure function of the endpoint, its plan and the
//! definitions.

use crate::oas::body::build_request_body;
use crate::oas::naming::{operation_id_candidate, ApiGroup, OperationIds};
use crate::oas::params::build_parameters;
use crate::oas::refs::ResolutionGap;
use crate::oas::responses::build_responses;
use crate::source::models::non_empty;
use crate::source::{Definitions, Endpoint};
use serde_json::{json, Map, Value};

/// OpenAPI version written into every document.
pub const OPENAPI_VERSION: &str = "3.1.0";

/// Version of the `info` block; the export carries no API version.
pub const DOCUMENT_VERSION: &str = "1.0.0";

/// Per-endpoint decisions taken before the document is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationPlan {
    /// Output partition.
    pub group: ApiGroup,
    /// Effective tags (never empty).
    pub tags: Vec<String>,
    /// Lowercase HTTP method.
    pub method: String,
    /// Run-unique operation identifier.
    pub operation_id: String,
}

/// A synthesized document together with the references it could not expand.
#[derive(Debug, Clone)]
pub struct SynthesizedDocument {
    /// The OpenAPI document.
    pub document: Value,
    /// Sentinels emitted while resolving its schemas.
    pub gaps: Vec<ResolutionGap>,
}

/// Computes group, tags, method and a unique operation id for `endpoint`.
pub fn plan_operation(endpoint: &Endpoint, operation_ids: &mut OperationIds) -> OperationPlan {
    let method = endpoint.normalized_method();
    let candidate =
        operation_id_candidate(endpoint.operation_id.as_deref(), &method, &endpoint.path);
    let operation_id = operation_ids.claim(&candidate, endpoint.id);

    OperationPlan {
        group: ApiGroup::from_module_id(endpoint.module_id),
        tags: endpoint.effective_tags(),
        method,
        operation_id,
    }
}

/// Builds the document for `endpoint` according to `plan`.
pub fn build_document(
    endpoint: &Endpoint,
    plan: &OperationPlan,
    definitions: &Definitions,
) -> SynthesizedDocument {
    let mut gaps = Vec::new();
    let name = non_empty(endpoint.name.as_ref());
    let description = non_empty(endpoint.description.as_ref());

    let mut info = Map::new();
    info.insert("title".into(), json!(name.unwrap_or(&plan.operation_id)));
    info.insert("version".into(), json!(DOCUMENT_VERSION));
    if let Some(desc) = description {
        info.insert("description".into(), json!(desc));
    }

    let mut operation = Map::new();
    operation.insert("tags".into(), json!(plan.tags));
    if let Some(summary) = name {
        operation.insert("summary".into(), json!(summary));
    }
    if let Some(desc) = description {
        operation.insert("description".into(), json!(desc));
    }
    operation.insert("operationId".into(), json!(plan.operation_id));
    operation.insert(
        "parameters".into(),
        Value::Array(build_parameters(
            endpoint.parameters.as_ref(),
            endpoint.id,
            definitions,
            &mut gaps,
        )),
    );
    if let Some(body) = build_request_body(endpoint.request_body.as_ref(), definitions, &mut gaps)
    {
        operation.insert("requestBody".into(), body);
    }
    operation.insert(
        "responses".into(),
        Value::Object(build_responses(
            endpoint.declared_responses(),
            definitions,
            &mut gaps,
        )),
    );

    let security = security_scheme(endpoint);
    if let Some((scheme_name, _)) = &security {
        operation.insert("security".into(), json!([{ *scheme_name: [] }]));
    }

    let mut path_item = Map::new();
    path_item.insert(plan.method.clone(), Value::Object(operation));
    let mut paths = Map::new();
    paths.insert(endpoint.path.clone(), Value::Object(path_item));

    let tags: Vec<Value> = plan.tags.iter().map(|t| json!({ "name": t })).collect();

    let mut document = Map::new();
    document.insert("openapi".into(), json!(OPENAPI_VERSION));
    document.insert("info".into(), Value::Object(info));
    document.insert("tags".into(), Value::Array(tags));
    document.insert("paths".into(), Value::Object(paths));
    if let Some((scheme_name, scheme)) = security {
        document.insert(
            "components".into(),
            json!({ "securitySchemes": { scheme_name: scheme } }),
        );
    }

    SynthesizedDocument {
        document: Value::Object(document),
        gaps,
    }
}

/// Security scheme declared by the endpoint's auth descriptor, if any.
///
/// Only HTTP `bearer` and `basic` carry enough information to be expressed.
fn security_scheme(endpoint: &Endpoint) -> Option<(&'static str, Value)> {
    let auth_type = endpoint
        .auth
        .as_ref()
        .and_then(|a| non_empty(a.ty.as_ref()))?
        .to_ascii_lowercase();

    match auth_type.as_str() {
        "bearer" => Some(("bearerAuth", json!({ "type": "http", "scheme": "bearer" }))),
        "basic" => Some(("basicAuth", json!({ "type": "http", "scheme": "basic" }))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn endpoint(value: Value) -> Endpoint {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_users_by_id_scenario() {
        let ep = endpoint(json!({
            "id": 7,
            "method": "GET",
            "path": "/users/{id}",
            "parameters": {"path": [{"name": "id", "required": false}]},
            "responses": []
        }));
        let mut ids = OperationIds::new();
        let plan = plan_operation(&ep, &mut ids);
        let doc = build_document(&ep, &plan, &Definitions::new());

        assert_eq!(plan.operation_id, "get-users-id");
        let op = &doc.document["paths"]["/users/{id}"]["get"];
        assert_eq!(
            op["parameters"],
            json!([{"name": "id", "in": "path", "required": true, "schema": {"type": "string"}}])
        );
        assert_eq!(op["responses"], json!({"200": {"description": "OK"}}));
        assert!(doc.gaps.is_empty());
    }

    #[test]
    fn test_full_document_shape() {
        let ep = endpoint(json!({
            "id": 12,
            "name": "Create chat completion",
            "description": "Creates a model response.",
            "operationId": "createChatCompletion",
            "method": "post",
            "path": "/v1/chat/completions",
            "tags": ["Chat"],
            "moduleId": 6656265,
            "requestBody": {"type": "application/json", "jsonSchema": {"type": "object"}},
            "responses": [{"code": 200, "name": "OK", "jsonSchema": {"type": "object"}}],
            "auth": {"type": "bearer"}
        }));
        let mut ids = OperationIds::new();
        let plan = plan_operation(&ep, &mut ids);
        let doc = build_document(&ep, &plan, &Definitions::new());

        assert_eq!(
            doc.document,
            json!({
                "openapi": "3.1.0",
                "info": {
                    "title": "Create chat completion",
                    "version": "1.0.0",
                    "description": "Creates a model response."
                },
                "tags": [{"name": "Chat"}],
                "paths": {
                    "/v1/chat/completions": {
                        "post": {
                            "tags": ["Chat"],
                            "summary": "Create chat completion",
                            "description": "Creates a model response.",
                            "operationId": "createchatcompletion",
                            "parameters": [],
                            "requestBody": {
                                "required": false,
                                "content": {"application/json": {"schema": {"type": "object"}}}
                            },
                            "responses": {
                                "200": {
                                    "description": "OK",
                                    "content": {"application/json": {"schema": {"type": "object"}}}
                                }
                            },
                            "security": [{"bearerAuth": []}]
                        }
                    }
                },
                "components": {
                    "securitySchemes": {"bearerAuth": {"type": "http", "scheme": "bearer"}}
                }
            })
        );
    }

    #[test]
    fn test_title_falls_back_to_operation_id() {
        let ep = endpoint(json!({"id": 1, "path": "/health"}));
        let mut ids = OperationIds::new();
        let plan = plan_operation(&ep, &mut ids);
        let doc = build_document(&ep, &plan, &Definitions::new());
        assert_eq!(doc.document["info"]["title"], json!("get-health"));
        assert!(doc.document["paths"]["/health"]["get"].get("summary").is_none());
        assert!(doc.document.get("components").is_none());
    }

    #[test]
    fn test_duplicate_hints_get_suffixed() {
        let first = endpoint(json!({"id": 1, "path": "/a", "operationId": "listModels"}));
        let second = endpoint(json!({"id": 2, "path": "/b", "operationId": "listModels"}));
        let mut ids = OperationIds::new();
        let a = plan_operation(&first, &mut ids);
        let b = plan_operation(&second, &mut ids);
        assert_eq!(a.operation_id, "listmodels");
        assert_eq!(b.operation_id, "listmodels-2");
    }

    #[test]
    fn test_gaps_are_collected() {
        let ep = endpoint(json!({
            "id": 3,
            "path": "/x",
            "responses": [{"code": 200, "jsonSchema": {"$ref": "#/definitions/1"}}]
        }));
        let mut ids = OperationIds::new();
        let plan = plan_operation(&ep, &mut ids);
        let doc = build_document(&ep, &plan, &Definitions::new());
        assert_eq!(doc.gaps, vec![ResolutionGap::Missing("1".into())]);
    }

    #[test]
    fn test_management_group() {
        let ep = endpoint(json!({"id": 4, "path": "/api/user", "moduleId": 6660656}));
        let mut ids = OperationIds::new();
        assert_eq!(plan_operation(&ep, &mut ids).group, ApiGroup::Management);
    }

    #[test]
    fn test_unknown_auth_adds_nothing() {
        let ep = endpoint(json!({"id": 5, "path": "/x", "auth": {"type": "noauth"}}));
        let mut ids = OperationIds::new();
        let plan = plan_operation(&ep, &mut ids);
        let doc = build_document(&ep, &plan, &Definitions::new());
        assert!(doc.document["paths"]["/x"]["get"].get("security").is_none());
    }
}
