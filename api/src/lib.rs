//! HTTP boundary: `POST /upload/`, `POST /ask/`, `GET /health`.

pub mod core;
pub mod error_handler;
mod routes;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

use crate::core::{app_state::AppState, server_config::ServerConfig};
use crate::error_handler::{AppError, AppResult};
use crate::routes::{
    ask::ask_route::ask_question, health::health_route::health, upload::upload_route::upload_files,
};

/// Builds the router over shared state. `max_body_bytes` caps every request body.
pub fn router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/upload/", post(upload_files))
        .route("/ask/", post(ask_question))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Loads configuration, builds shared clients and serves until Ctrl+C.
///
/// # Errors
/// Missing or invalid configuration, or a failure to bind/serve.
pub async fn start() -> AppResult<()> {
    let server = ServerConfig::from_env()?;
    let state = Arc::new(AppState::from_env()?);
    let app = router(state, server.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(&server.address)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %server.address, "HTTP server listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("HTTP server stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
