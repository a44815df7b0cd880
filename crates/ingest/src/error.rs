//! Error types for the ingestion pipeline.

use crate::transport::TransportError;
use thiserror::Error;

/// Errors that terminate an account's listener.
///
/// Everything below this boundary (per-conversation backfill failures,
/// per-event write failures) is absorbed locally with a log line and never
/// surfaces here.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Transport-level error (authentication, dropped connection).
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Store error outside the per-event write path.
    #[error("Store error: {0}")]
    Store(#[from] msgvault_store::StoreError),
}

/// Result alias for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;
