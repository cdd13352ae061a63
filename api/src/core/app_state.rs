use std::sync::Arc;

use ai_llm_service::{
    AiLlmError, LlmServiceProfiles,
    config::default_config::{config_chat_from_env, config_embedding_from_env},
};
use contextor::{Contextor, ContextorConfig};
use pdf_ingest::{RecursiveSplitter, SplitterConfig, SplitterError};
use rag_store::{LlmEmbedder, RagConfig, RagError, RagStore};
use thiserror::Error;
use tracing::info;

/// Startup configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Llm(#[from] AiLlmError),

    #[error(transparent)]
    Rag(#[from] RagError),

    #[error(transparent)]
    Splitter(#[from] SplitterError),

    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Shared state for all HTTP handlers.
///
/// Every client is built once at startup and shared by all requests.
pub struct AppState {
    pub rag: Arc<RagStore>,
    pub contextor: Arc<Contextor>,
    pub splitter: RecursiveSplitter,
    /// Provider service for `/health`; absent when the state is assembled from fakes.
    pub llm: Option<Arc<LlmServiceProfiles>>,
}

impl AppState {
    pub fn new(
        rag: Arc<RagStore>,
        contextor: Arc<Contextor>,
        splitter: RecursiveSplitter,
        llm: Option<Arc<LlmServiceProfiles>>,
    ) -> Self {
        Self {
            rag,
            contextor,
            splitter,
            llm,
        }
    }

    /// Load shared state from environment variables.
    ///
    /// # Errors
    /// Any missing credential (`COHERE_API_KEY`, `GROQ_API_KEY`, `QDRANT_URL`,
    /// `QDRANT_API_KEY`, depending on the selected providers) or invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let llm = Arc::new(LlmServiceProfiles::new(
            config_chat_from_env()?,
            config_embedding_from_env()?,
            Some(10),
        )?);

        let rag_cfg = RagConfig::from_env()?;
        let embedder = Arc::new(LlmEmbedder::new(llm.clone(), rag_cfg.space.size));
        let rag = Arc::new(RagStore::connect_qdrant(rag_cfg, embedder)?);

        let contextor = Arc::new(Contextor::new(
            rag.clone(),
            llm.clone(),
            ContextorConfig::from_rag(rag.config()),
        ));
        let splitter = RecursiveSplitter::new(SplitterConfig::from_env()?);

        let (chat, embedding) = llm.profiles();
        info!(
            collection = %rag.config().collection,
            chat_provider = %chat.provider,
            chat_model = %chat.model,
            embedding_provider = %embedding.provider,
            embedding_model = %embedding.model,
            chunk_size = splitter.config().chunk_size,
            chunk_overlap = splitter.config().chunk_overlap,
            "application state ready"
        );

        Ok(Self::new(rag, contextor, splitter, Some(llm)))
    }
}
