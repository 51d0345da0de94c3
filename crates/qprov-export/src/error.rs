//! Export error type.

use thiserror::Error;

/// Errors produced while rendering or decoding records.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// JSON encoding or decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encoding failed.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The requested export format is not recognized.
    #[error("unknown export format '{0}' (expected json, cyclonedx, spdx, or yaml)")]
    UnknownFormat(String),
}

/// Result alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
