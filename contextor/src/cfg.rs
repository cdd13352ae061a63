//! Answer synthesis settings.

use rag_store::{DEFAULT_TOP_K, RagConfig};

#[derive(Clone, Debug)]
pub struct ContextorConfig {
    /// Chunks retrieved per question.
    pub top_k: u64,
}

impl Default for ContextorConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl ContextorConfig {
    /// Takes `top_k` from the store configuration, where `RAG_TOP_K` is
    /// parsed and validated once.
    pub fn from_rag(rag: &RagConfig) -> Self {
        Self { top_k: rag.top_k }
    }
}
