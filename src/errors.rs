// errors.rs
use thiserror::Error;

/// Errors from the fallible edges of the crate: reading payloads,
/// parsing CLI values and the snapshot store.
/// Mapping a listing never produces one of these.
#[derive(Debug, Error)]
pub enum NormalizerError {
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database connection unavailable")]
    ConnectionUnavailable,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Type alias used across the library.
pub type Result<T> = std::result::Result<T, NormalizerError>;
