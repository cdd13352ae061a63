//! Embedding provider backed by the shared LLM service.

use std::sync::Arc;

use ai_llm_service::{EmbedPurpose, LlmServiceProfiles};
use tracing::debug;

use crate::embed::{EmbedFuture, EmbeddingsProvider};
use crate::errors::RagError;

/// Adapts [`LlmServiceProfiles`] (embedding profile) to [`EmbeddingsProvider`].
#[derive(Clone)]
pub struct LlmEmbedder {
    svc: Arc<LlmServiceProfiles>,
    dim: usize,
}

impl LlmEmbedder {
    /// `dim` is the expected vector size; any other length is rejected.
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: usize) -> Self {
        Self { svc, dim }
    }

    fn check(&self, v: &[f32]) -> Result<(), RagError> {
        if v.len() != self.dim {
            return Err(RagError::VectorSizeMismatch {
                got: v.len(),
                want: self.dim,
            });
        }
        Ok(())
    }
}

impl EmbeddingsProvider for LlmEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_documents<'a>(&'a self, texts: &'a [String]) -> EmbedFuture<'a, Vec<Vec<f32>>> {
        Box::pin(async move {
            let vectors = self.svc.embed_batch(texts, EmbedPurpose::Document).await?;
            if vectors.len() != texts.len() {
                return Err(RagError::EmbeddingCount {
                    got: vectors.len(),
                    want: texts.len(),
                });
            }
            for v in &vectors {
                self.check(v)?;
            }
            debug!(count = vectors.len(), dim = self.dim, "documents embedded");
            Ok(vectors)
        })
    }

    fn embed_query<'a>(&'a self, text: &'a str) -> EmbedFuture<'a, Vec<f32>> {
        Box::pin(async move {
            let v = self.svc.embed(text, EmbedPurpose::Query).await?;
            self.check(&v)?;
            Ok(v)
        })
    }
}
