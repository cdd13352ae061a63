//! Unified error types for the crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

/// Top-level error for rag-store operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Required environment variable is missing or empty.
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),

    /// Embedding length differs from the collection's vector size.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Creation hit a collection with the same name.
    #[error("collection '{0}' already exists")]
    CollectionExists(String),

    #[error("collection '{0}' does not exist")]
    CollectionNotFound(String),

    /// Qdrant client errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),

    /// Embedding provider failure.
    #[error("embedding error: {0}")]
    Embedding(#[from] AiLlmError),

    /// Provider returned a different number of vectors than texts sent.
    #[error("embedding count mismatch: got {got}, want {want}")]
    EmbeddingCount { got: usize, want: usize },

    /// JSON serialization errors (payload building).
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
