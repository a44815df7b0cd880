//! HTTP server for the msgvault API.

use crate::{config::ApiConfig, router::build_router, ApiError, ApiState};
use axum::Router;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// HTTP server wrapping the search router.
pub struct ApiServer {
    config: ApiConfig,
    router: Router,
}

impl ApiServer {
    /// Create a new API server with the given configuration and state.
    pub fn new(config: ApiConfig, state: ApiState) -> Self {
        let router = build_router(&config, state);
        Self { config, router }
    }

    /// Run the server until the token is cancelled.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), ApiError> {
        let addr = self.config.bind_addr;
        let router = self.build_router_with_middleware();

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            ApiError::Io(std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                format!("Failed to bind to {}: {}", addr, e),
            ))
        })?;

        info!("API server listening on {}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

        info!("API server shutdown complete");
        Ok(())
    }

    /// Build router with all middleware layers.
    fn build_router_with_middleware(&self) -> Router {
        let mut router = self.router.clone();

        if self.config.request_timeout_seconds > 0 {
            router = router.layer(tower_http::timeout::TimeoutLayer::new(
                std::time::Duration::from_secs(self.config.request_timeout_seconds),
            ));
        }

        if self.config.enable_request_logging {
            router = router.layer(tower_http::trace::TraceLayer::new_for_http());
        }

        router = router.layer(tower_http::limit::RequestBodyLimitLayer::new(
            self.config.max_body_size,
        ));

        router
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.config.bind_addr
    }
}
