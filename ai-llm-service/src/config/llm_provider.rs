use std::{fmt, str::FromStr};

use crate::error_handler::ConfigError;

/// Represents the provider (backend) used for inference or embeddings.
///
/// Groq and other OpenAI-compatible gateways are served by [`LlmProvider::OpenAI`]
/// with a different endpoint.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmProvider;
///
/// let p: LlmProvider = "cohere".parse().unwrap();
/// assert_eq!(p, LlmProvider::Cohere);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime.
    Ollama,
    /// OpenAI REST API or any OpenAI-compatible gateway (Groq).
    OpenAI,
    /// Cohere REST API (embeddings only).
    Cohere,
}

impl LlmProvider {
    /// Whether this provider can serve chat completions.
    pub fn supports_chat(self) -> bool {
        !matches!(self, LlmProvider::Cohere)
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LlmProvider::Ollama => "Ollama",
            LlmProvider::OpenAI => "OpenAI",
            LlmProvider::Cohere => "Cohere",
        };
        f.write_str(s)
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(LlmProvider::Ollama),
            "openai" | "chatgpt" | "groq" => Ok(LlmProvider::OpenAI),
            "cohere" => Ok(LlmProvider::Cohere),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}
