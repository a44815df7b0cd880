//! Axum router configuration for the msgvault HTTP API.

use crate::config::ApiConfig;
use axum::routing::{get, post};
use axum::Router;
use msgvault_store::Repository;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ApiState {
    pub repo: Arc<Repository>,
    /// Number of configured accounts, reported by `/health`.
    pub account_count: usize,
}

/// Build the API router with all routes registered.
pub fn build_router(config: &ApiConfig, state: ApiState) -> Router {
    let mut router = Router::new()
        .route("/search", post(crate::search::search_handler))
        .route("/health", get(crate::search::health_handler))
        .with_state(state);

    if config.enable_cors {
        router = router.layer(create_cors_layer());
    }

    router
}

/// Permissive CORS for read-only query access.
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
}
