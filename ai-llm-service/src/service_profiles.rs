//! Shared LLM service with two profiles: `chat` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Caches underlying HTTP clients per config (provider+endpoint+model+key+timeout).
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::{ChatMessage, EmbedPurpose, LlmServiceProfiles};
//! use ai_llm_service::config::default_config::{config_chat_from_env, config_embedding_from_env};
//!
//! # async fn run() -> Result<(), ai_llm_service::AiLlmError> {
//! let svc = Arc::new(LlmServiceProfiles::new(
//!     config_chat_from_env()?,
//!     config_embedding_from_env()?,
//!     Some(10),
//! )?);
//!
//! let answer = svc.complete(&[ChatMessage::user("Hello")]).await?;
//! let vector = svc.embed("Who is the petitioner?", EmbedPurpose::Query).await?;
//! println!("{answer} / dim={}", vector.len());
//! # Ok(()) }
//! ```

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::{
    chat::{ChatMessage, EmbedPurpose},
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind},
    health_service::{HealthService, HealthStatus},
    services::{
        cohere_service::CohereService, ollama_service::OllamaService,
        open_ai_service::OpenAiService,
    },
};

/// Shared service that manages the **chat** and **embedding** profiles.
pub struct LlmServiceProfiles {
    chat: LlmModelConfig,
    embedding: LlmModelConfig,

    ollama: RwLock<HashMap<ClientKey, Arc<OllamaService>>>,
    openai: RwLock<HashMap<ClientKey, Arc<OpenAiService>>>,
    cohere: RwLock<HashMap<ClientKey, Arc<CohereService>>>,

    health: HealthService,
}

impl LlmServiceProfiles {
    /// Creates a new service.
    ///
    /// # Errors
    /// - [`ConfigError::UnsupportedRole`] if the chat provider cannot chat
    /// - [`ConfigError::EmptyModel`] if either model id is blank
    pub fn new(
        chat: LlmModelConfig,
        embedding: LlmModelConfig,
        health_timeout_secs: Option<u64>,
    ) -> Result<Self, AiLlmError> {
        if !chat.provider.supports_chat() {
            return Err(ConfigError::UnsupportedRole {
                provider: chat.provider,
                role: "chat",
            }
            .into());
        }
        if chat.model.trim().is_empty() || embedding.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        Ok(Self {
            chat,
            embedding,
            ollama: RwLock::new(HashMap::new()),
            openai: RwLock::new(HashMap::new()),
            cohere: RwLock::new(HashMap::new()),
            health: HealthService::new(health_timeout_secs)?,
        })
    }

    /// Runs one non-streaming chat turn with the **chat** profile.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AiLlmError> {
        match self.chat.provider {
            LlmProvider::Ollama => self.ollama_client(&self.chat).await?.chat(messages).await,
            LlmProvider::OpenAI => self.openai_client(&self.chat).await?.complete(messages).await,
            LlmProvider::Cohere => Err(ProviderError::new(
                LlmProvider::Cohere,
                ProviderErrorKind::Unsupported("chat"),
            )
            .into()),
        }
    }

    /// Embeds a batch of texts with the **embedding** profile.
    ///
    /// Output order matches input order.
    pub async fn embed_batch(
        &self,
        texts: &[String],
        purpose: EmbedPurpose,
    ) -> Result<Vec<Vec<f32>>, AiLlmError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        match self.embedding.provider {
            LlmProvider::Ollama => {
                self.ollama_client(&self.embedding)
                    .await?
                    .embeddings(texts)
                    .await
            }
            LlmProvider::OpenAI => {
                self.openai_client(&self.embedding)
                    .await?
                    .embeddings(texts)
                    .await
            }
            LlmProvider::Cohere => {
                self.cohere_client(&self.embedding)
                    .await?
                    .embed(texts, purpose)
                    .await
            }
        }
    }

    /// Embeds a single text.
    pub async fn embed(&self, input: &str, purpose: EmbedPurpose) -> Result<Vec<f32>, AiLlmError> {
        let mut out = self.embed_batch(&[input.to_string()], purpose).await?;
        out.pop().ok_or_else(|| {
            ProviderError::new(
                self.embedding.provider,
                ProviderErrorKind::Decode("empty embeddings response".into()),
            )
            .into()
        })
    }

    /// Returns a health snapshot for both profiles (once if they are identical).
    pub async fn health_all(&self) -> Vec<HealthStatus> {
        let mut list = vec![self.chat.clone()];
        if self.embedding != self.chat {
            list.push(self.embedding.clone());
        }
        self.health.check_many(&list).await
    }

    /// Returns references to the current profiles `(chat, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (&self.chat, &self.embedding)
    }

    /* --------------------- Internals --------------------- */

    async fn ollama_client(&self, cfg: &LlmModelConfig) -> Result<Arc<OllamaService>, AiLlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.ollama.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(OllamaService::new(cfg.clone())?);
        let mut w = self.ollama.write().await;
        Ok(w.entry(key).or_insert(cli).clone())
    }

    async fn openai_client(&self, cfg: &LlmModelConfig) -> Result<Arc<OpenAiService>, AiLlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.openai.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(OpenAiService::new(cfg.clone())?);
        let mut w = self.openai.write().await;
        Ok(w.entry(key).or_insert(cli).clone())
    }

    async fn cohere_client(&self, cfg: &LlmModelConfig) -> Result<Arc<CohereService>, AiLlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.cohere.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let cli = Arc::new(CohereService::new(cfg.clone())?);
        let mut w = self.cohere.write().await;
        Ok(w.entry(key).or_insert(cli).clone())
    }
}

/// Internal cache key to identify unique client configs.
#[derive(Clone, PartialEq, Eq, Hash)]
struct ClientKey {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Option<u64>,
}

impl From<&LlmModelConfig> for ClientKey {
    fn from(cfg: &LlmModelConfig) -> Self {
        Self {
            provider: cfg.provider,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.timeout_secs,
        }
    }
}
