//! Search request handling.
//!
//! Translates the JSON request body into store-level [`SearchFilters`],
//! clamps pagination to the documented bounds, and shapes the result rows
//! for the wire.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use msgvault_core::constants::{
    SEARCH_LIMIT_DEFAULT, SEARCH_LIMIT_MAX, SEARCH_LIMIT_MIN, SEARCH_OFFSET_MAX,
};
use msgvault_store::{SearchFilters, StoredMessage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiResult;
use crate::router::ApiState;

/// `POST /search` request body. Every field is optional; omitted fields
/// are unconstrained.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    pub source: Option<String>,
    pub query: Option<String>,
    pub account: Option<String>,
    pub thread_id: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `POST /search` response body. `query` and `source` echo the request
/// so clients can correlate responses without tracking state.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub messages: Vec<MessageBody>,
    /// Total size of the filtered set, irrespective of pagination.
    pub total: i64,
    pub query: Option<String>,
    pub source: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// One message as serialized on the wire. Event time is RFC 3339.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub id: i64,
    pub source: String,
    pub account_label: String,
    pub thread_id: Option<String>,
    pub sender_id: Option<String>,
    pub sender_name: Option<String>,
    pub text: Option<String>,
    pub ts: String,
    pub metadata: serde_json::Value,
}

impl From<StoredMessage> for MessageBody {
    fn from(row: StoredMessage) -> Self {
        let ts = row.ts_datetime().to_rfc3339();
        let metadata = row.metadata();
        Self {
            id: row.id,
            source: row.source,
            account_label: row.account_label,
            thread_id: row.thread_id,
            sender_id: row.sender_id,
            sender_name: row.sender_name,
            text: row.text,
            ts,
            metadata,
        }
    }
}

impl SearchRequest {
    fn filters(&self) -> SearchFilters {
        SearchFilters {
            source: self.source.clone(),
            query: self.query.clone(),
            account_label: self.account.clone(),
            thread_id: self.thread_id.clone(),
            from_ts: self.from.map(|t| t.timestamp_millis()),
            to_ts: self.to.map(|t| t.timestamp_millis()),
        }
    }
}

/// Clamp a requested page size into `[SEARCH_LIMIT_MIN, SEARCH_LIMIT_MAX]`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(SEARCH_LIMIT_DEFAULT)
        .clamp(SEARCH_LIMIT_MIN, SEARCH_LIMIT_MAX)
}

/// Clamp a requested offset into `[0, SEARCH_OFFSET_MAX]`.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).clamp(0, SEARCH_OFFSET_MAX)
}

/// Handler for `POST /search`.
pub async fn search_handler(
    State(state): State<ApiState>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<Json<SearchResponse>> {
    let filters = request.filters();
    let limit = clamp_limit(request.limit);
    let offset = clamp_offset(request.offset);

    debug!(?filters, limit, offset, "search request");

    let rows = state.repo.search_messages(&filters, limit, offset).await?;
    let total = state.repo.count_messages(&filters).await?;

    Ok(Json(SearchResponse {
        messages: rows.into_iter().map(MessageBody::from).collect(),
        total,
        query: request.query,
        source: request.source,
        limit,
        offset,
    }))
}

/// Handler for `GET /health`.
pub async fn health_handler(State(state): State<ApiState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "accounts": state.account_count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(clamp_limit(None), SEARCH_LIMIT_DEFAULT);
        assert_eq!(clamp_limit(Some(0)), SEARCH_LIMIT_MIN);
        assert_eq!(clamp_limit(Some(-10)), SEARCH_LIMIT_MIN);
        assert_eq!(clamp_limit(Some(500)), SEARCH_LIMIT_MAX);
        assert_eq!(clamp_limit(Some(42)), 42);
    }

    #[test]
    fn offset_defaults_and_clamps() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-5)), 0);
        assert_eq!(clamp_offset(Some(1_000_000)), SEARCH_OFFSET_MAX);
        assert_eq!(clamp_offset(Some(40)), 40);
    }

    #[test]
    fn request_maps_time_bounds_to_millis() {
        let from = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let request = SearchRequest {
            from: Some(from),
            ..Default::default()
        };
        let filters = request.filters();
        assert_eq!(filters.from_ts, Some(from.timestamp_millis()));
        assert_eq!(filters.to_ts, None);
    }
}
