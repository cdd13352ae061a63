//! POST /ask/: answers a question from the uploaded documents.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::{error, info};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::ask::ask_request::{AskQuery, AskResponse},
};

/// Handler: POST /ask/
///
/// Accepts `query` as urlencoded or multipart form data. The question is
/// passed to the model unchanged; blank questions are rejected.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/ask/ -F 'query=Who is the petitioner?'
/// curl -X POST http://127.0.0.1:8000/ask/ --data-urlencode 'query=Who is the petitioner?'
/// ```
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    AskQuery(query): AskQuery,
) -> AppResult<Json<AskResponse>> {
    if query.trim().is_empty() {
        return Err(AppError::BadRequest("`query` must not be empty".into()));
    }

    let qa = state.contextor.ask(&query).await.map_err(|e| {
        error!(error = %e, "ask failed");
        AppError::RetrievalFailed
    })?;

    info!(context_chunks = qa.context.len(), "ask answered");
    Ok(Json(AskResponse { answer: qa.answer }))
}
