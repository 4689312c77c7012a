//! CLI support for treexl
//!
//! Provides programmatic access to the `treexl` commands so other tools can
//! embed them without going through the binary.

mod check;
mod convert;
mod docs;
mod generate;

pub use check::{CheckResult, Inspection, execute_check, execute_inspect, execute_tokens};
pub use convert::{params_to_json, value_to_json};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use generate::{QuoteStyle, SqlOptions, SqlOutput, execute_sql};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Scanning, parsing or rendering failed
    #[error(transparent)]
    Treexl(#[from] crate::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No expression provided
    #[error("No expression provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'treexl docs' to see available categories.")]
    UnknownCategory(String),
}
