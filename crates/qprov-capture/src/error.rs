//! Error types for the capture crate.

use thiserror::Error;

/// Errors that can occur in capture operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CaptureError {
    /// An interception point is already installed for this (target, name).
    ///
    /// Indicates a programming error in adapter registration, not a runtime
    /// condition to recover from automatically.
    #[error("Interception point already installed: {target}.{name}")]
    Conflict {
        /// Name of the function table.
        target: String,
        /// Name of the wrapped function.
        name: String,
    },

    /// The target table has no function with the requested name.
    #[error("No function named '{name}' in target '{target}'")]
    MissingFunction {
        /// Name of the function table.
        target: String,
        /// Requested function name.
        name: String,
    },

    /// An event was applied to an accumulator after it froze.
    #[error("Accumulator for '{scope}' is frozen and accepts no further events")]
    Closed {
        /// Scope name of the frozen accumulator.
        scope: String,
    },

    /// No accumulator is active in the session.
    #[error("No active accumulator in session")]
    NoActiveScope,

    /// A requested record has no persisted form.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A persisted record exists but could not be decoded.
    #[error("Invalid record format in '{path}': {reason}")]
    InvalidFormat {
        /// Path of the offending file.
        path: String,
        /// Decode failure detail.
        reason: String,
    },

    /// I/O error from the trace store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for capture operations.
pub type CaptureResult<T> = Result<T, CaptureError>;
