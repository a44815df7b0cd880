//! SQLite-backed message store for msgvault.
//!
//! Owns persistence and indexing for accounts and captured messages.
//! Session listeners only append through [`Repository`]; the search API
//! only reads. Concurrency safety is delegated to the pool and SQLite's
//! own transactional guarantees.

pub mod db;
pub mod error;
pub mod repository;

pub use db::{connect, MIGRATOR};
pub use error::{StoreError, StoreResult};
pub use repository::{AccountRow, Repository, SearchFilters, StoredMessage};
