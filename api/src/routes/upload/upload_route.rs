//! POST /upload/: replaces the document collection with the uploaded PDFs.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
};
use pdf_ingest::Document;
use tracing::{debug, error, info};

use crate::{
    core::{app_state::AppState, pipeline::ingest_documents},
    error_handler::{AppError, AppResult},
    routes::upload::upload_response::UploadResponse,
};

const FILES_FIELD: &str = "files";
const FALLBACK_FILENAME: &str = "upload.pdf";

/// Handler: POST /upload/
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/upload/ \
///   -F 'files=@petition.pdf' -F 'files=@order.pdf'
/// ```
pub async fn upload_files(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut documents = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            debug!(field = ?field.name(), "ignoring multipart field");
            continue;
        }
        let filename = field.file_name().unwrap_or(FALLBACK_FILENAME).to_string();
        let bytes = field.bytes().await?;
        documents.push(Document::new(filename, bytes.to_vec()));
    }

    if documents.is_empty() {
        return Err(AppError::BadRequest(format!(
            "expected at least one `{FILES_FIELD}` part"
        )));
    }

    let files = documents.len();
    let chunks = ingest_documents(&state, documents).await.map_err(|e| {
        error!(error = %e, files, "upload failed");
        AppError::UploadFailed
    })?;

    info!(files, chunks, "upload stored");
    Ok(Json(UploadResponse::stored(chunks)))
}
