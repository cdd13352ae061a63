//! GET /health: vector store and model provider reachability.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use tracing::warn;

use crate::{
    core::app_state::AppState,
    routes::health::health_response::{ComponentHealth, HealthResponse},
};

/// Handler: GET /health
///
/// Returns 200 when every dependency answers, 503 otherwise.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let vector_store = match state.rag.ping().await {
        Ok(()) => ComponentHealth {
            ok: true,
            message: None,
        },
        Err(e) => {
            warn!(error = %e, "vector store unreachable");
            ComponentHealth {
                ok: false,
                message: Some(e.to_string()),
            }
        }
    };

    let providers = match &state.llm {
        Some(llm) => llm.health_all().await,
        None => Vec::new(),
    };

    let healthy = vector_store.ok && providers.iter().all(|p| p.ok);
    let (code, status) = if healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            vector_store,
            providers,
            checked_at: Utc::now().to_rfc3339(),
        }),
    )
}
