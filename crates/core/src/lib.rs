//! Core types, errors, and configuration for msgvault
//!
//! This crate provides the foundational types shared by the ingestion
//! pipeline and the search API: account configuration loaded from the
//! environment, the canonical message record all origin events are
//! normalized into, and the common error type.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use config::{AccountRegistry, AppConfig};
pub use error::{Error, Result};
pub use types::*;
