//! Error types for transit.

use thiserror::Error;

/// Result type alias for transit operations.
pub type Result<T> = std::result::Result<T, TransitError>;

/// Errors raised while interpreting user-supplied values.
///
/// Request-time lookups never produce these; they surface only at the
/// boundaries where text is turned into typed values (CLI, configuration).
#[derive(Error, Debug)]
pub enum TransitError {
    /// Country code not recognized.
    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    /// Date string could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
