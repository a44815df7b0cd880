//! Integration tests for the search API routes.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use msgvault_api::{build_router, ApiConfig, ApiState};
use msgvault_core::NewMessage;
use msgvault_store::{Repository, MIGRATOR};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

async fn test_state() -> (ApiState, Arc<Repository>) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    MIGRATOR.run(&pool).await.expect("migrations failed");

    let repo = Arc::new(Repository::new(Arc::new(pool)));
    let state = ApiState {
        repo: repo.clone(),
        account_count: 2,
    };
    (state, repo)
}

fn test_router(state: ApiState) -> Router {
    build_router(&ApiConfig::default(), state)
}

fn message(account: &str, text: &str, ts_millis: i64) -> NewMessage {
    NewMessage {
        source: "telegram".to_string(),
        account_label: account.to_string(),
        thread_id: Some("100".to_string()),
        sender_id: Some("7".to_string()),
        sender_name: Some("Alice".to_string()),
        text: Some(text.to_string()),
        ts: Utc.timestamp_millis_opt(ts_millis).unwrap(),
        metadata: json!({}),
    }
}

async fn seed(repo: &Repository) {
    // tg1's message is older than tg2's.
    repo.append_message(&message("tg1", "rust deployment checklist", 1_000))
        .await
        .unwrap();
    repo.append_message(&message("tg2", "weekend hiking plan", 2_000))
        .await
        .unwrap();
}

async fn post_search(router: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/search")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_reports_account_count() {
    let (state, _repo) = test_state().await;
    let router = test_router(state);

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["accounts"], 2);
}

#[tokio::test]
async fn empty_body_returns_newest_first() {
    let (state, repo) = test_state().await;
    seed(&repo).await;
    let router = test_router(state);

    let (status, body) = post_search(router, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["account_label"], "tg2");
    assert_eq!(messages[1]["account_label"], "tg1");
}

#[tokio::test]
async fn text_query_narrows_results() {
    let (state, repo) = test_state().await;
    seed(&repo).await;
    let router = test_router(state);

    let (status, body) = post_search(router, json!({"query": "hiking"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["query"], "hiking");
    assert_eq!(body["messages"][0]["account_label"], "tg2");
    assert_eq!(body["messages"][0]["text"], "weekend hiking plan");
}

#[tokio::test]
async fn limit_and_offset_are_clamped() {
    let (state, repo) = test_state().await;
    seed(&repo).await;
    let router = test_router(state);

    // limit 0 clamps up to 1, so a single row comes back while total
    // still reflects the whole filtered set.
    let (status, body) = post_search(router, json!({"limit": 0, "offset": -5})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["limit"], 1);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["total"], 2);
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    assert_eq!(body["messages"][0]["account_label"], "tg2");
}

#[tokio::test]
async fn oversized_limit_is_capped() {
    let (state, _repo) = test_state().await;
    let router = test_router(state);

    let (status, body) = post_search(router, json!({"limit": 500})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["limit"], 100);
}

#[tokio::test]
async fn unknown_account_returns_empty_page() {
    let (state, repo) = test_state().await;
    seed(&repo).await;
    let router = test_router(state);

    let (status, body) = post_search(router, json!({"account": "tg9"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert!(body["messages"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn time_range_is_inclusive() {
    let (state, repo) = test_state().await;
    seed(&repo).await;
    let router = test_router(state);

    let from = Utc.timestamp_millis_opt(1_000).unwrap().to_rfc3339();
    let to = Utc.timestamp_millis_opt(1_000).unwrap().to_rfc3339();
    let (status, body) = post_search(router, json!({"from": from, "to": to})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["messages"][0]["account_label"], "tg1");
}

#[tokio::test]
async fn response_carries_rfc3339_timestamp_and_metadata() {
    let (state, repo) = test_state().await;
    let mut msg = message("tg1", "hello", 1_700_000_000_000);
    msg.metadata = json!({"chat_title": "ops"});
    repo.append_message(&msg).await.unwrap();
    let router = test_router(state);

    let (status, body) = post_search(router, json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let row = &body["messages"][0];
    let ts = row["ts"].as_str().unwrap();
    assert!(ts.starts_with("2023-11-14T"), "unexpected ts: {ts}");
    assert_eq!(row["metadata"]["chat_title"], "ops");
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (state, _repo) = test_state().await;
    let router = test_router(state);

    let request = Request::builder()
        .method("POST")
        .uri("/search")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}
