//! Universal health service for LLM backends (Ollama, OpenAI-compatible, Cohere).
//!
//! Each provider is probed through its model listing endpoint:
//! - Ollama: `GET {endpoint}/api/tags`
//! - OpenAI / Groq: `GET {endpoint}/v1/models` with Bearer auth
//! - Cohere: `GET {endpoint}/v1/models` with Bearer auth
//!
//! The returned [`HealthStatus`] is JSON-serializable and suitable for a `/health` endpoint.
//! [`HealthService::check`] is resilient and never fails (errors mapped to `ok=false`).

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{AiLlmError, HealthError, HttpError, is_http_endpoint, make_snippet};

/// A serializable health snapshot for a single provider/config.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Backend/provider (e.g., "Ollama", "Cohere").
    pub provider: String,
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model identifier relevant to the probe.
    pub model: Option<String>,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds for the main probe.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

impl HealthStatus {
    fn new(cfg: &LlmModelConfig, ok: bool, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: cfg.provider.to_string(),
            endpoint: cfg.endpoint.trim().to_string(),
            model: Some(cfg.model.clone()),
            ok,
            latency_ms,
            message: message.into(),
        }
    }
}

/// A universal health checker that reuses a single HTTP client.
pub struct HealthService {
    client: reqwest::Client,
    default_timeout: Duration,
}

impl HealthService {
    /// Creates a new health service with an optional client timeout (seconds).
    ///
    /// # Errors
    /// Returns [`AiLlmError::HttpTransport`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, AiLlmError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        info!(
            default_timeout_secs = timeout.as_secs(),
            "HealthService initialized"
        );

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    /// Checks health for a single config. Never returns an error.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        if !is_http_endpoint(&cfg.endpoint) {
            warn!(
                provider = %cfg.provider,
                endpoint = %cfg.endpoint,
                "invalid endpoint (empty or missing http/https)"
            );
            return HealthStatus::new(cfg, false, 0, "endpoint is empty or missing http/https");
        }

        let start = Instant::now();
        match self.try_probe(cfg).await {
            Ok(status) => {
                info!(
                    provider = %status.provider,
                    endpoint = %status.endpoint,
                    ok = status.ok,
                    latency_ms = status.latency_ms,
                    "health probe completed"
                );
                status
            }
            Err(err) => {
                let status = HealthStatus::new(cfg, false, start.elapsed().as_millis(), err.to_string());
                warn!(
                    provider = %status.provider,
                    endpoint = %status.endpoint,
                    latency_ms = status.latency_ms,
                    message = %status.message,
                    "health probe failed"
                );
                status
            }
        }
    }

    /// Checks health for multiple configs sequentially.
    pub async fn check_many(&self, configs: &[LlmModelConfig]) -> Vec<HealthStatus> {
        debug!(count = configs.len(), "running batch health probes");
        let mut out = Vec::with_capacity(configs.len());
        for cfg in configs {
            out.push(self.check(cfg).await);
        }
        out
    }

    /// Strict probe. Returns an error on transport failures and non-2xx statuses.
    ///
    /// A reachable server whose model list cannot be decoded is reported as healthy;
    /// a decoded list that lacks `cfg.model` is reported as unhealthy.
    async fn try_probe(&self, cfg: &LlmModelConfig) -> Result<HealthStatus, AiLlmError> {
        let url = format!("{}{}", cfg.base_url(), models_path(cfg.provider));
        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(self.default_timeout);

        let mut req = self.client.get(&url).timeout(timeout);
        if cfg.provider != LlmProvider::Ollama {
            let api_key = cfg.api_key.as_deref().ok_or_else(|| {
                HealthError::Decode(format!("missing {} API key", cfg.provider))
            })?;
            let auth = header::HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
                .map_err(|e| HealthError::Decode(format!("invalid API key header: {e}")))?;
            req = req.header(header::AUTHORIZATION, auth);
        }

        let start = Instant::now();
        debug!(provider = %cfg.provider, model = %cfg.model, "GET {}", url);
        let resp = req.send().await?;
        let latency = start.elapsed().as_millis();

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);
            error!(
                provider = %cfg.provider,
                %url,
                %status,
                %snippet,
                latency_ms = latency,
                "health probe returned non-success status"
            );
            return Err(HealthError::HttpStatus(HttpError {
                status,
                url,
                snippet,
            })
            .into());
        }

        let body = resp.text().await?;
        let status = match model_names(cfg.provider, &body) {
            Ok(names) if names.iter().any(|n| model_matches(n, &cfg.model)) => HealthStatus::new(
                cfg,
                true,
                latency,
                format!("{} is healthy; model is available", cfg.provider),
            ),
            Ok(_) => HealthStatus::new(
                cfg,
                false,
                latency,
                format!("{} is up, but model not found", cfg.provider),
            ),
            Err(e) => {
                warn!(
                    provider = %cfg.provider,
                    error = %e,
                    "failed to decode model list; treating server as reachable"
                );
                HealthStatus::new(
                    cfg,
                    true,
                    latency,
                    format!("{} is reachable; failed to decode model list: {e}", cfg.provider),
                )
            }
        };
        Ok(status)
    }
}

fn models_path(provider: LlmProvider) -> &'static str {
    match provider {
        LlmProvider::Ollama => "/api/tags",
        LlmProvider::OpenAI | LlmProvider::Cohere => "/v1/models",
    }
}

/// Ollama tags may carry an implicit `:latest` suffix.
fn model_matches(listed: &str, wanted: &str) -> bool {
    listed == wanted || listed.strip_suffix(":latest") == Some(wanted)
}

/// Extracts model identifiers from a provider's listing response.
fn model_names(provider: LlmProvider, body: &str) -> Result<Vec<String>, serde_json::Error> {
    #[derive(Deserialize)]
    struct Named {
        name: String,
    }
    #[derive(Deserialize)]
    struct Identified {
        id: String,
    }
    // Ollama and Cohere: { "models": [ { "name": .. } ] }
    #[derive(Deserialize)]
    struct Models {
        #[serde(default)]
        models: Vec<Named>,
    }
    // OpenAI: { "data": [ { "id": .. } ] }
    #[derive(Deserialize)]
    struct Data {
        data: Vec<Identified>,
    }

    match provider {
        LlmProvider::Ollama | LlmProvider::Cohere => Ok(serde_json::from_str::<Models>(body)?
            .models
            .into_iter()
            .map(|m| m.name)
            .collect()),
        LlmProvider::OpenAI => Ok(serde_json::from_str::<Data>(body)?
            .data
            .into_iter()
            .map(|m| m.id)
            .collect()),
    }
}
