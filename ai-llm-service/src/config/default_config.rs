//! Default LLM configs loaded strictly from environment variables.
//!
//! Two roles are configured:
//!
//! - **Chat**      → answer synthesis (Groq by default, via the OpenAI-compatible API)
//! - **Embedding** → document and query embeddings (Cohere by default)
//!
//! # Environment variables
//!
//! Embedding:
//! - `EMBEDDING_PROVIDER` = `cohere` (default) | `openai` | `ollama`
//! - `EMBEDDING_MODEL`    = model id (default `embed-english-light-v3.0`)
//! - `COHERE_API_KEY`     = required for `cohere`
//! - `COHERE_URL`         = optional, default `https://api.cohere.com`
//!
//! Chat:
//! - `CHAT_PROVIDER` = `groq` (default) | `openai` | `ollama`
//! - `CHAT_MODEL`    = model id (default `llama3-70b-8192`)
//! - `GROQ_API_KEY` / `GROQ_URL`     = Groq credentials and base URL
//! - `OPENAI_API_KEY` / `OPENAI_URL` = OpenAI credentials and base URL
//!
//! Shared:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = Ollama endpoint
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (u64)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt_u32, env_opt_u64, env_or, must_env,
        validate_http_endpoint,
    },
};

pub const DEFAULT_EMBEDDING_MODEL: &str = "embed-english-light-v3.0";
pub const DEFAULT_CHAT_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_COHERE_URL: &str = "https://api.cohere.com";
pub const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";

/// Resolves the Ollama endpoint strictly from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
///
/// # Errors
///
/// - [`ConfigError::MissingVar`] if both are missing
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn ollama_endpoint() -> Result<String, AiLlmError> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            validate_http_endpoint("OLLAMA_URL", &url)?;
            return Ok(url.trim().to_string());
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Err(AiLlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

/// Reads the embedding provider from `EMBEDDING_PROVIDER` (default `cohere`).
///
/// # Errors
/// [`ConfigError::UnsupportedProvider`] for unknown names.
pub fn embedding_provider_from_env() -> Result<LlmProvider, AiLlmError> {
    Ok(env_or("EMBEDDING_PROVIDER", "cohere").parse()?)
}

/// Constructs the **embedding** profile from environment.
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic)
/// - `timeout_secs = Some(30)` unless `LLM_TIMEOUT_SECS` is set
pub fn config_embedding_from_env() -> Result<LlmModelConfig, AiLlmError> {
    let provider = embedding_provider_from_env()?;
    let model = env_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL);
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.or(Some(30));

    let (endpoint, api_key) = match provider {
        LlmProvider::Cohere => (
            env_or("COHERE_URL", DEFAULT_COHERE_URL),
            Some(must_env("COHERE_API_KEY")?),
        ),
        LlmProvider::OpenAI => (
            env_or("OPENAI_URL", DEFAULT_OPENAI_URL),
            Some(must_env("OPENAI_API_KEY")?),
        ),
        LlmProvider::Ollama => (ollama_endpoint()?, None),
    };
    validate_http_endpoint("EMBEDDING endpoint", &endpoint)?;

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs,
    })
}

/// Constructs the **chat** profile from environment.
///
/// `CHAT_PROVIDER=groq` (the default) resolves to the OpenAI-compatible client
/// pointed at `GROQ_URL` with `GROQ_API_KEY`.
///
/// # Defaults
/// - sampling parameters left to the provider
/// - `timeout_secs = Some(120)` unless `LLM_TIMEOUT_SECS` is set
///
/// # Errors
/// - [`ConfigError::MissingVar`] when the provider's key is absent
/// - [`ConfigError::UnsupportedRole`] for `cohere`
pub fn config_chat_from_env() -> Result<LlmModelConfig, AiLlmError> {
    let name = env_or("CHAT_PROVIDER", "groq").to_ascii_lowercase();
    let provider: LlmProvider = name.parse()?;
    if !provider.supports_chat() {
        return Err(ConfigError::UnsupportedRole {
            provider,
            role: "chat",
        }
        .into());
    }

    let (endpoint, api_key) = match name.as_str() {
        "groq" => (
            env_or("GROQ_URL", DEFAULT_GROQ_URL),
            Some(must_env("GROQ_API_KEY")?),
        ),
        "ollama" => (ollama_endpoint()?, None),
        _ => (
            env_or("OPENAI_URL", DEFAULT_OPENAI_URL),
            Some(must_env("OPENAI_API_KEY")?),
        ),
    };
    validate_http_endpoint("CHAT endpoint", &endpoint)?;

    let model = env_or("CHAT_MODEL", DEFAULT_CHAT_MODEL);
    if model.trim().is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: None,
        top_p: None,
        timeout_secs: env_opt_u64("LLM_TIMEOUT_SECS")?.or(Some(120)),
    })
}
