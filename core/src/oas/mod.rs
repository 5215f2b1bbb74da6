#![deny(missing_docs)]

//! # OpenAPI Synthesis Module
//!
//! - **refs**: `#/definitions/<id>` resolution with cycle protection.
//! - **naming**: slugs, operation ids, groups.
//! - **params** / **body** / **responses**: operation parts.
//! - **document**: assembly of the per-endpoint document.

pub mod body;
pub mod document;
pub mod naming;
pub mod params;
pub mod refs;
pub mod responses;

pub use document::{build_document, plan_operation, OperationPlan, SynthesizedDocument};
pub use naming::{slugify, ApiGroup, OperationIds};
pub use refs::{resolve_schema, resolve_schema_into, ResolutionGap};
