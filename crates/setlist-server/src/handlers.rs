//! HTTP request handlers for the recommendation service.
//!
//! Implements recommendation, diagnostics, health and reload endpoints
//! using axum.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use setlist_engine::{EngineError, ModelHandle, RecommendationEngine, RecommendationResult};
use setlist_store::RuleRecord;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Currently served corpus snapshot
    pub handle: Arc<ModelHandle>,
    /// Stateless ranking engine
    pub engine: Arc<RecommendationEngine>,
    /// Corpus location re-read on reload
    pub model_path: PathBuf,
    /// Version label stamped on reloaded snapshots
    pub model_version: String,
}

/// Recommendation request body
///
/// `songs` is kept as raw JSON so that malformed seed lists reach the
/// engine, which answers them with an empty result.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// Seed items
    #[serde(default = "empty_list", alias = "items")]
    pub songs: serde_json::Value,

    /// Maximum number of recommendations
    #[serde(default)]
    pub top_n: Option<usize>,
}

fn empty_list() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}

/// Diagnostic view of the corpus
#[derive(Debug, Serialize, Deserialize)]
pub struct DebugResponse {
    /// Number of rules
    pub rules_count: usize,
    /// The first rules of the corpus
    pub sample_rules: Vec<RuleRecord>,
    /// Corpus version
    pub version: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Number of rules being served
    pub rules_count: usize,
    /// Corpus version
    pub version: String,
    /// Corpus load time
    pub model_date: DateTime<Utc>,
}

/// Reload outcome
#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadResponse {
    /// Always "reloaded"
    pub status: String,
    /// Rules in the new snapshot
    pub rules_count: usize,
    /// Version of the new snapshot
    pub version: String,
    /// Load time of the new snapshot
    pub model_date: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// The request body could not be understood
    BadRequest(String),
    /// A reload was rejected; the previous snapshot is still served
    Reload(EngineError),
    /// Internal server error
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Reload(e) if e.is_not_found() => (StatusCode::NOT_FOUND, e.to_string()),
            AppError::Reload(e) if e.is_corrupt() => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            AppError::Reload(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<EngineError> for AppError {
    fn from(e: EngineError) -> Self {
        AppError::Reload(e)
    }
}

/// POST /api/recommend - Recommend items for a seed list
///
/// The body is parsed as JSON regardless of content type.
async fn recommend(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RecommendationResult>, AppError> {
    let request: RecommendRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?;

    let snapshot = state.handle.current();
    let top_n = state.engine.config().effective_top_n(request.top_n);
    let items = state
        .engine
        .recommend_json(snapshot.store(), &request.songs, top_n);

    Ok(Json(snapshot.result(items)))
}

/// GET /api/debug - Rule count and a sample of rules
async fn debug_model(State(state): State<AppState>) -> Json<DebugResponse> {
    let snapshot = state.handle.current();
    let store = snapshot.store();

    Json(DebugResponse {
        rules_count: store.len(),
        sample_rules: store
            .sample(state.engine.config().debug_sample_size)
            .iter()
            .map(RuleRecord::from)
            .collect(),
        version: snapshot.metadata().version.clone(),
    })
}

/// GET /health - Liveness plus the snapshot being served
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let snapshot = state.handle.current();

    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        rules_count: snapshot.store().len(),
        version: snapshot.metadata().version.clone(),
        model_date: snapshot.metadata().loaded_at,
    })
}

/// POST /api/admin/reload - Re-read the corpus and swap it in
async fn reload_model(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let handle = Arc::clone(&state.handle);
    let path = state.model_path.clone();
    let version = state.model_version.clone();

    info!(path = %path.display(), "Reload requested");

    let snapshot = tokio::task::spawn_blocking(move || handle.reload(path, version))
        .await
        .map_err(|e| {
            error!("Reload task failed: {}", e);
            AppError::InternalError(format!("Reload task failed: {}", e))
        })??;

    Ok(Json(ReloadResponse {
        status: "reloaded".to_string(),
        rules_count: snapshot.store().len(),
        version: snapshot.metadata().version.clone(),
        model_date: snapshot.metadata().loaded_at,
    }))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/api/recommend", post(recommend))
        .route("/api/debug", get(debug_model))
        .route("/api/admin/reload", post(reload_model))
        .route("/health", get(health_check))
        .with_state(state)
}
