//! Error types for msgvault core functionality.

use thiserror::Error;

/// Main error type for msgvault core operations.
///
/// Core only fails while loading configuration; the store, ingestion,
/// and API crates each carry their own error enums at their boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for msgvault core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
