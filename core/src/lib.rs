#![deny(missing_docs)]

//! # oasdoc Core
//!
//! Build-time pipeline turning an API-export payload into one OpenAPI 3.1
//! document per operation, plus the pass that keeps documentation pages
//! pointing at those documents.

/// Shared error types.
pub mod error;

/// Endpoint and schema-definition ingestion.
pub mod source;

/// OpenAPI document synthesis.
pub mod oas;

/// Output path computation.
pub mod placement;

/// Generation orchestration.
pub mod pipeline;

/// Stale document-reference repair.
pub mod repair;

pub use error::{AppError, AppResult};
pub use oas::{
    build_document, plan_operation, resolve_schema, ApiGroup, OperationIds, OperationPlan,
    ResolutionGap, SynthesizedDocument,
};
pub use pipeline::{run_generation, GenerationConfig, GenerationSummary};
pub use placement::{document_path, sanitize_path_part};
pub use repair::{repair, FileIndex, LocaleReport, RepairConfig};
pub use source::{
    fetch_endpoints, load_definitions, parse_endpoint_root, Definitions, DefinitionsLoad, Endpoint,
    EndpointSource, FileSource, StaticSource,
};
