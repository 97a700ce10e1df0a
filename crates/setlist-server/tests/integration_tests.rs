//! Integration tests for the HTTP service

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use setlist_server::{
    build_state,
    config::ServerConfig,
    handlers::{create_router, AppState, DebugResponse, ErrorResponse, HealthCheckResponse, ReloadResponse},
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt; // for oneshot

fn write_corpus(path: &Path, corpus: Value) {
    fs::write(path, serde_json::to_string(&corpus).unwrap()).unwrap();
}

fn scenario_corpus() -> Value {
    json!([
        {"antecedents": ["A"], "consequents": ["B"], "confidence": 0.8},
        {"antecedents": ["A", "C"], "consequents": ["D"], "confidence": 0.9}
    ])
}

/// Helper to create application state backed by a corpus file
fn create_test_state(dir: &TempDir, corpus: Value) -> AppState {
    let path = dir.path().join("rules.json");
    write_corpus(&path, corpus);

    let config = ServerConfig {
        model_path: path,
        model_version: "0.1".to_string(),
        ..ServerConfig::default()
    };
    build_state(&config).unwrap()
}

async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn recommend(state: &AppState, body: &str) -> Value {
    let (status, body) = send(create_router(state.clone()), "POST", "/api/recommend", body).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_recommend_single_seed() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir, scenario_corpus());

    let response = recommend(&state, r#"{"songs": ["A"]}"#).await;
    assert_eq!(response["songs"], json!(["B"]));
    assert_eq!(response["version"], "0.1");
    assert!(response["model_date"].is_string());
}

#[tokio::test]
async fn test_recommend_ranks_by_confidence() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir, scenario_corpus());

    let response = recommend(&state, r#"{"songs": ["C", "A"]}"#).await;
    assert_eq!(response["songs"], json!(["D", "B"]));
}

#[tokio::test]
async fn test_recommend_accepts_items_alias_and_top_n() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir, scenario_corpus());

    let response = recommend(&state, r#"{"items": ["A", "C"], "top_n": 1}"#).await;
    assert_eq!(response["songs"], json!(["D"]));
}

#[tokio::test]
async fn test_recommend_empty_and_missing_seeds() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir, scenario_corpus());

    assert_eq!(recommend(&state, r#"{"songs": []}"#).await["songs"], json!([]));
    assert_eq!(recommend(&state, r#"{}"#).await["songs"], json!([]));
}

#[tokio::test]
async fn test_recommend_malformed_seeds_yield_empty_result() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir, scenario_corpus());

    let response = recommend(&state, r#"{"songs": ["A", 42]}"#).await;
    assert_eq!(response["songs"], json!([]));
    assert_eq!(response["version"], "0.1");

    let response = recommend(&state, r#"{"songs": "A"}"#).await;
    assert_eq!(response["songs"], json!([]));
}

#[tokio::test]
async fn test_recommend_invalid_json_is_bad_request() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir, scenario_corpus());

    let (status, body) = send(create_router(state), "POST", "/api/recommend", "songs=A").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.error.contains("Invalid JSON"));
}

#[tokio::test]
async fn test_debug_endpoint_samples_rules() {
    let dir = TempDir::new().unwrap();
    let corpus: Vec<Value> = (0..8)
        .map(|i| {
            json!({
                "antecedents": [format!("seed{}", i)],
                "consequents": [format!("rec{}", i)],
                "confidence": 0.5
            })
        })
        .collect();
    let state = create_test_state(&dir, Value::Array(corpus));

    let (status, body) = send(create_router(state), "GET", "/api/debug", "").await;
    assert_eq!(status, StatusCode::OK);

    let debug: DebugResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(debug.rules_count, 8);
    assert_eq!(debug.sample_rules.len(), 5);
    assert_eq!(debug.sample_rules[0].antecedents, vec!["seed0"]);
    assert_eq!(debug.sample_rules[4].consequents, vec!["rec4"]);
    assert_eq!(debug.version, "0.1");
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir, scenario_corpus());

    let (status, body) = send(create_router(state), "GET", "/health", "").await;
    assert_eq!(status, StatusCode::OK);

    let health: HealthCheckResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.rules_count, 2);
    assert_eq!(health.version, "0.1");
}

#[tokio::test]
async fn test_reload_swaps_corpus() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir, scenario_corpus());

    write_corpus(
        &state.model_path,
        json!([{"antecedents": ["A"], "consequents": ["Z"], "confidence": 0.7}]),
    );
    let (status, body) = send(create_router(state.clone()), "POST", "/api/admin/reload", "").await;
    assert_eq!(status, StatusCode::OK);

    let reload: ReloadResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(reload.status, "reloaded");
    assert_eq!(reload.rules_count, 1);

    let response = recommend(&state, r#"{"songs": ["A"]}"#).await;
    assert_eq!(response["songs"], json!(["Z"]));
}

#[tokio::test]
async fn test_rejected_reload_keeps_serving() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir, scenario_corpus());

    write_corpus(
        &state.model_path,
        json!([{"antecedents": ["A"], "consequents": ["B"]}]),
    );
    let (status, body) = send(create_router(state.clone()), "POST", "/api/admin/reload", "").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.error.contains("confidence"));

    let response = recommend(&state, r#"{"songs": ["A", "C"]}"#).await;
    assert_eq!(response["songs"], json!(["D", "B"]));
}

#[tokio::test]
async fn test_reload_of_unreadable_corpus_is_unprocessable() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir, scenario_corpus());

    fs::write(&state.model_path, [0xff, 0xfe, b'[', b']']).unwrap();
    let (status, _) = send(create_router(state.clone()), "POST", "/api/admin/reload", "").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let response = recommend(&state, r#"{"songs": ["A"]}"#).await;
    assert_eq!(response["songs"], json!(["B"]));
}
