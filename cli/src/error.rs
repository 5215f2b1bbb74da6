#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use oasdoc_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// Failure reported by the core pipeline.
    #[display("{}", _0)]
    Core(AppError),

    /// Invalid option or environment value.
    #[display("Configuration error: {}", _0)]
    Config(String),
}

/// Manual implementation of the standard Error trait.
///
/// Implemented by hand because `Config(String)` holds a type that is not an
/// error source, which trips the derived `source()`.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
