//! Shared LLM provider layer.
//!
//! One [`service_profiles::LlmServiceProfiles`] is built at startup with a
//! **chat** profile (answer synthesis) and an **embedding** profile (indexing
//! and retrieval), then shared via `Arc` by every request.

pub mod chat;
pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod service_profiles;
pub mod services;

pub use chat::{ChatMessage, ChatRole, EmbedPurpose};
pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::AiLlmError;
pub use health_service::HealthStatus;
pub use service_profiles::LlmServiceProfiles;
