//! High-level RAG facade: collection reset, indexing and retrieval.
//!
//! This crate provides a small API to:
//! - Replace a collection's contents with a new batch of chunks
//! - Retrieve top-K context for a textual query
//!
//! The vector database and the embedding backend sit behind the
//! [`VectorStore`] and [`EmbeddingsProvider`] traits; Qdrant and the shared
//! LLM service are the production implementations.

mod collection;
mod config;
pub mod embed;
mod errors;
mod ingest;
pub mod memory;
mod qdrant_facade;
mod record;
mod retrieve;
mod vector_store;

use std::sync::Arc;

pub use collection::{CollectionState, ensure_fresh_collection};
pub use config::{
    DEFAULT_COLLECTION, DEFAULT_TOP_K, DEFAULT_UPSERT_BATCH, DEFAULT_VECTOR_SIZE, DistanceKind,
    RagConfig, VectorSpace,
};
pub use embed::{EmbeddingsProvider, hashing::HashingEmbedder, llm::LlmEmbedder};
pub use errors::RagError;
pub use ingest::index_chunks;
pub use memory::MemoryVectorStore;
pub use qdrant_facade::QdrantFacade;
pub use record::{RagHit, RagQuery, StoredRecord};
pub use retrieve::rag_context;
pub use vector_store::{StoreFuture, VectorStore};

use tracing::{info, trace};

/// Facade that wires configuration, vector store and embedder.
///
/// This is the single entry point recommended for application code.
pub struct RagStore {
    cfg: RagConfig,
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn EmbeddingsProvider>,
}

impl RagStore {
    /// # Errors
    /// - `RagError::Config` for invalid config values
    /// - `RagError::VectorSizeMismatch` if the embedder's dimension differs
    ///   from the collection's vector size
    pub fn new(
        cfg: RagConfig,
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn EmbeddingsProvider>,
    ) -> Result<Self, RagError> {
        cfg.validate()?;
        if embedder.dim() != cfg.space.size {
            return Err(RagError::VectorSizeMismatch {
                got: embedder.dim(),
                want: cfg.space.size,
            });
        }
        trace!("RagStore::new collection={}", cfg.collection);
        Ok(Self {
            cfg,
            store,
            embedder,
        })
    }

    /// Builds a store backed by Qdrant.
    pub fn connect_qdrant(
        cfg: RagConfig,
        embedder: Arc<dyn EmbeddingsProvider>,
    ) -> Result<Self, RagError> {
        let store = Arc::new(QdrantFacade::new(&cfg)?);
        Self::new(cfg, store, embedder)
    }

    pub fn config(&self) -> &RagConfig {
        &self.cfg
    }

    /// Resets the collection and indexes `chunks` into it.
    ///
    /// The reset happens even when `chunks` is empty, so an upload without
    /// text leaves an empty collection behind. Returns the stored count.
    pub async fn replace_collection(&self, chunks: &[String]) -> Result<usize, RagError> {
        let state =
            ensure_fresh_collection(self.store.as_ref(), &self.cfg.collection, &self.cfg.space)
                .await?;
        let stored = index_chunks(&self.cfg, self.store.as_ref(), self.embedder.as_ref(), chunks)
            .await?;
        info!(
            collection = %self.cfg.collection,
            ?state,
            chunks = stored,
            "collection replaced"
        );
        Ok(stored)
    }

    /// Top-K hits for `query`.
    pub async fn rag_context(&self, query: RagQuery<'_>) -> Result<Vec<RagHit>, RagError> {
        trace!("RagStore::rag_context top_k={}", query.top_k);
        rag_context(&self.cfg, self.store.as_ref(), self.embedder.as_ref(), query).await
    }

    /// Shorthand for [`RagStore::rag_context`] with the configured `top_k`.
    pub async fn search_text(&self, text: &str) -> Result<Vec<RagHit>, RagError> {
        self.rag_context(RagQuery {
            text,
            top_k: self.cfg.top_k,
        })
        .await
    }

    /// Checks vector store connectivity.
    pub async fn ping(&self) -> Result<(), RagError> {
        self.store.ping().await
    }
}
