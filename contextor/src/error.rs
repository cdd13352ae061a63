//! Typed error for the contextor crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextorError {
    /// Embedding or vector store failure during retrieval.
    #[error("RAG error: {0}")]
    Rag(#[from] rag_store::RagError),

    /// Chat completion failure.
    #[error("LLM error: {0}")]
    Llm(#[from] ai_llm_service::AiLlmError),
}
