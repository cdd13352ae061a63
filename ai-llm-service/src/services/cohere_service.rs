//! Cohere embeddings client.
//!
//! - POST {endpoint}/v1/embed: batch embeddings with an `input_type` hint
//!
//! Cohere serves embeddings only; chat goes through another provider.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    chat::EmbedPurpose,
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ProviderError, ProviderErrorKind, is_http_endpoint},
    services::ensure_success,
};

/// Maximum number of texts Cohere accepts per `/v1/embed` call.
pub const COHERE_MAX_BATCH: usize = 96;

#[derive(Debug)]
pub struct CohereService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_embed: String,
}

impl CohereService {
    /// Creates a new [`CohereService`].
    ///
    /// # Errors
    /// `InvalidProvider`, `MissingApiKey`, `InvalidEndpoint`, or a transport
    /// error when the HTTP client cannot be built.
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::Cohere {
            return Err(fail(ProviderErrorKind::InvalidProvider));
        }
        let api_key = cfg
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| fail(ProviderErrorKind::MissingApiKey))?;
        if !is_http_endpoint(&cfg.endpoint) {
            return Err(fail(ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone())));
        }

        let timeout = Duration::from_secs(cfg.timeout_secs.unwrap_or(30));
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", api_key.trim())).map_err(|e| {
                fail(ProviderErrorKind::Decode(format!(
                    "invalid API key header: {e}"
                )))
            })?,
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .gzip(true)
            .build()?;

        let url_embed = format!("{}/v1/embed", cfg.base_url());
        info!(model = %cfg.model, endpoint = %cfg.endpoint, "CohereService initialized");

        Ok(Self {
            client,
            cfg,
            url_embed,
        })
    }

    /// Embeds `texts`, splitting into calls of at most [`COHERE_MAX_BATCH`].
    ///
    /// # Errors
    /// - `HttpStatus` for non-2xx responses
    /// - `Decode` when the body is malformed or the count differs from the input
    pub async fn embed(
        &self,
        texts: &[String],
        purpose: EmbedPurpose,
    ) -> Result<Vec<Vec<f32>>, AiLlmError> {
        let mut all = Vec::with_capacity(texts.len());
        for batch in texts.chunks(COHERE_MAX_BATCH) {
            all.extend(self.embed_once(batch, purpose).await?);
        }
        Ok(all)
    }

    async fn embed_once(
        &self,
        texts: &[String],
        purpose: EmbedPurpose,
    ) -> Result<Vec<Vec<f32>>, AiLlmError> {
        let started = Instant::now();
        let body = EmbedRequest {
            model: &self.cfg.model,
            texts,
            input_type: purpose.cohere_input_type(),
            truncate: "END",
        };

        debug!(inputs = texts.len(), input_type = body.input_type, "POST {}", self.url_embed);
        let resp = self.client.post(&self.url_embed).json(&body).send().await?;
        let resp = ensure_success(LlmProvider::Cohere, resp, &self.url_embed).await?;

        let out: EmbedResponse = resp.json().await.map_err(|e| {
            fail(ProviderErrorKind::Decode(format!(
                "serde error: {e}; expected `{{ embeddings: number[][] }}`"
            )))
        })?;
        if out.embeddings.len() != texts.len() {
            return Err(fail(ProviderErrorKind::Decode(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                out.embeddings.len()
            ))));
        }

        debug!(
            count = out.embeddings.len(),
            latency_ms = started.elapsed().as_millis(),
            "cohere embeddings received"
        );
        Ok(out.embeddings)
    }
}

fn fail(kind: ProviderErrorKind) -> AiLlmError {
    ProviderError::new(LlmProvider::Cohere, kind).into()
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    texts: &'a [String],
    input_type: &'static str,
    truncate: &'static str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Cohere,
            model: "embed-english-light-v3.0".into(),
            endpoint: "https://api.cohere.com".into(),
            api_key: Some("co-test".into()),
            max_tokens: None,
            temperature: Some(0.0),
            top_p: None,
            timeout_secs: Some(30),
        }
    }

    #[test]
    fn builds_embed_url() {
        let svc = CohereService::new(cfg()).unwrap();
        assert_eq!(svc.url_embed, "https://api.cohere.com/v1/embed");
    }

    #[test]
    fn rejects_missing_key() {
        let mut c = cfg();
        c.api_key = None;
        assert!(CohereService::new(c).is_err());
    }

    #[test]
    fn request_carries_input_type() {
        let texts = vec!["a".to_string()];
        let body = EmbedRequest {
            model: "embed-english-light-v3.0",
            texts: &texts,
            input_type: EmbedPurpose::Query.cohere_input_type(),
            truncate: "END",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["input_type"], "search_query");
        assert_eq!(json["texts"][0], "a");
    }
}
