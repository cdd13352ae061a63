//! Upload pipeline: extract + split on the blocking pool, then reset and index.

use pdf_ingest::{Document, prepare_chunks};
use rag_store::RagError;
use thiserror::Error;
use tracing::warn;

use crate::core::app_state::AppState;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("document preparation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Rag(#[from] RagError),
}

/// Replaces the collection with the chunks of `documents`; returns the stored count.
///
/// Unreadable documents are skipped with a warning.
pub async fn ingest_documents(
    state: &AppState,
    documents: Vec<Document>,
) -> Result<usize, UploadError> {
    let splitter = state.splitter.clone();
    let batch = tokio::task::spawn_blocking(move || prepare_chunks(&documents, &splitter)).await?;

    for doc in batch.per_document.iter().filter(|d| d.unreadable) {
        warn!(filename = %doc.filename, "unreadable document skipped");
    }

    Ok(state.rag.replace_collection(&batch.chunks).await?)
}
