//! Multi-account ingestion pipeline for msgvault.
//!
//! One [`SessionListener`] per configured account owns that account's live
//! connection: an optional historical backfill pass on startup, then live
//! event capture, with every observed event normalized into the canonical
//! message record and appended to the store. The [`IngestionSupervisor`]
//! runs the listeners concurrently and independently; one account failing
//! never takes down its siblings.
//!
//! The connection to the messaging network sits behind the [`Transport`]
//! trait so the pipeline is testable with in-memory fakes.

pub mod error;
pub mod listener;
pub mod supervisor;
pub mod transport;

pub use error::{IngestError, IngestResult};
pub use listener::{ListenerOptions, SessionListener};
pub use supervisor::IngestionSupervisor;
pub use transport::{NetworkSession, Transport, TransportError};
