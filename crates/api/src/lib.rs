//! HTTP search API server for msgvault.
//!
//! A stateless query engine over the message store: one `POST /search`
//! endpoint composing optional filters into a bounded, paginated query,
//! plus `GET /health`. Runs concurrently with the ingestion listeners
//! against the same connection pool.

pub mod config;
pub mod error;
pub mod router;
pub mod search;
pub mod server;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use router::{build_router, ApiState};
pub use server::ApiServer;
