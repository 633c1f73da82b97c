//! Error types for cagemetrics

use thiserror::Error;

use crate::types::Individual;

/// Errors that can occur while processing supervised behavior tables
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("cage {cage}: missing expected column {column}")]
    MissingColumn { cage: String, column: String },

    #[error("cage {cage}: table has no frames")]
    EmptyTable { cage: String },

    #[error("column {column}: expected {expected} frames, found {actual}")]
    ShapeMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("no speed summary for cage {cage}, {individual}")]
    MissingSpeedSummary { cage: String, individual: Individual },

    #[error("failed to parse table data: {0}")]
    ParseError(String),

    #[error("invalid project config: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("spreadsheet write failed: {0}")]
    SpreadsheetError(#[from] rust_xlsxwriter::XlsxError),
}
