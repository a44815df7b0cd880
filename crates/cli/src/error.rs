//! Error types for CLI operations.

use thiserror::Error;

/// Main error type for CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// API server error.
    #[error("API server error: {0}")]
    Api(String),

    /// Ingestion error.
    #[error("Ingestion error: {0}")]
    Ingest(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<msgvault_core::Error> for CliError {
    fn from(err: msgvault_core::Error) -> Self {
        match err {
            msgvault_core::Error::Config(msg) => CliError::Config(msg),
        }
    }
}

impl From<msgvault_store::StoreError> for CliError {
    fn from(err: msgvault_store::StoreError) -> Self {
        CliError::Database(err.to_string())
    }
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
