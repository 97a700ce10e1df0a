//! Setlist Server
//!
//! HTTP surface for the recommendation engine. Loads one rule corpus at
//! startup, serves recommendations from it, and swaps in a re-read corpus
//! on demand without interrupting in-flight requests.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use setlist_engine::{EngineError, ModelHandle, RecommendationEngine};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The initial corpus could not be loaded
    #[error("Failed to load model: {0}")]
    Model(#[from] EngineError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// Honors `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load the configured corpus and assemble handler state
///
/// Fails if the corpus is missing or corrupt: the server never starts
/// without a loaded store.
pub fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    let handle = ModelHandle::load(&config.model_path, config.model_version.clone())?;

    Ok(AppState {
        handle: Arc::new(handle),
        engine: Arc::new(RecommendationEngine::new(config.engine.clone())),
        model_path: config.model_path.clone(),
        model_version: config.model_version.clone(),
    })
}

/// Start the HTTP server
///
/// Loads the corpus, builds the router and serves until Ctrl+C.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Setlist server");
    info!("Bind address: {}", config.bind_addr());
    info!("Model path: {}", config.model_path.display());
    info!("Model version: {}", config.model_version);

    let state = build_state(&config)?;
    info!(
        "Serving {} rules (loaded at {})",
        state.handle.current().store().len(),
        state.handle.current().metadata().loaded_at.to_rfc3339()
    );

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_build_state_requires_model() {
        let config = ServerConfig {
            model_path: PathBuf::from("/nonexistent/setlist/rules.json"),
            ..ServerConfig::default()
        };
        match build_state(&config) {
            Err(ServerError::Model(e)) => assert!(e.is_not_found()),
            Err(other) => panic!("expected model error, got {}", other),
            Ok(_) => panic!("expected model error"),
        }
    }
}
