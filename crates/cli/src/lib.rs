//! Command-line interface for msgvault.
//!
//! This crate wires the account registry, ingestion supervisor and HTTP
//! search API into one long-running process.

#![deny(missing_docs, unsafe_code)]

/// CLI command definitions and parsing.
pub mod commands;

/// CLI application entry point and configuration.
pub mod app;

/// Error types for CLI operations.
pub mod error;
