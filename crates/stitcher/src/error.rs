//! Error types for Stitcher

use thiserror::Error;

/// Main error type for Stitcher operations
///
/// Memory lookups never produce errors: a missing entry is `None` and a
/// refused consolidation is `false`. These variants cover the fallible
/// edges around the store.
#[derive(Error, Debug)]
pub enum StitcherError {
    /// Configuration errors (missing file, bad TOML, out-of-range values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl From<serde_json::Error> for StitcherError {
    fn from(err: serde_json::Error) -> Self {
        StitcherError::Serialization(err.to_string())
    }
}

/// Result type alias for Stitcher operations
pub type Result<T> = std::result::Result<T, StitcherError>;
