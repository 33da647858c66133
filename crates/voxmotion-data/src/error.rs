//! Error types for game data loading.

use thiserror::Error;

/// Errors raised while loading registries and feature tables.
#[derive(Error, Debug)]
pub enum DataError {
    /// Version string could not be parsed
    #[error("Invalid game version: {0}")]
    InvalidVersion(String),

    /// JSON document could not be decoded
    #[error("Malformed data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using [`DataError`].
pub type Result<T> = std::result::Result<T, DataError>;
