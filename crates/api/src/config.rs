//! Configuration for the msgvault HTTP API server.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Socket address to bind to.
    pub bind_addr: SocketAddr,

    /// Enable CORS.
    pub enable_cors: bool,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Enable request logging.
    pub enable_request_logging: bool,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], msgvault_core::constants::DEFAULT_HTTP_PORT).into(),
            enable_cors: true,
            request_timeout_seconds: 30,
            enable_request_logging: true,
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

impl ApiConfig {
    /// Default configuration bound to the given port.
    pub fn with_port(port: u16) -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], port).into(),
            ..Self::default()
        }
    }
}
