//! Answer synthesis over retrieved context.
//!
//! [`Contextor::ask`] retrieves the top-K chunks for a question from
//! `rag-store`, joins them into one context block, sends a fixed system
//! instruction plus a context/question turn to the chat model and returns
//! the model's reply verbatim.

mod api_types;
pub mod cfg;
mod error;
pub mod llm;
pub mod prompt;

use std::sync::Arc;
use std::time::Instant;

pub use api_types::{QaAnswer, UsedChunk};
pub use cfg::ContextorConfig;
pub use error::ContextorError;
pub use llm::ChatModel;
pub use prompt::{NOT_AVAILABLE_ANSWER, SYSTEM_PROMPT};

use rag_store::{RagHit, RagQuery, RagStore};
use tracing::{debug, info};

/// Builds the prompt from `hits` (in order) and returns the model's reply.
///
/// Empty `hits` still produce a call, with an empty context block.
///
/// # Errors
/// [`ContextorError::Llm`] when the chat call fails. There is no fallback answer.
pub async fn synthesize(
    chat: &dyn ChatModel,
    question: &str,
    hits: &[RagHit],
) -> Result<String, ContextorError> {
    let context_block = prompt::build_context_block(hits.iter().map(|h| h.text.as_str()));
    let messages = prompt::build_messages(question, &context_block);
    debug!(
        hits = hits.len(),
        context_chars = context_block.chars().count(),
        "prompt built"
    );
    chat.complete(&messages).await
}

/// Retrieval plus synthesis, sharing one store and one chat model.
pub struct Contextor {
    rag: Arc<RagStore>,
    chat: Arc<dyn ChatModel>,
    cfg: ContextorConfig,
}

impl Contextor {
    pub fn new(rag: Arc<RagStore>, chat: Arc<dyn ChatModel>, cfg: ContextorConfig) -> Self {
        Self { rag, chat, cfg }
    }

    /// Answers `question` from the current collection.
    ///
    /// # Errors
    /// Retrieval ([`ContextorError::Rag`]) or chat ([`ContextorError::Llm`]) failures.
    pub async fn ask(&self, question: &str) -> Result<QaAnswer, ContextorError> {
        let started = Instant::now();
        let hits = self
            .rag
            .rag_context(RagQuery {
                text: question,
                top_k: self.cfg.top_k,
            })
            .await?;

        let answer = synthesize(self.chat.as_ref(), question, &hits).await?;

        info!(
            hits = hits.len(),
            answer_chars = answer.chars().count(),
            latency_ms = started.elapsed().as_millis(),
            "question answered"
        );

        let context = hits
            .into_iter()
            .map(|h| UsedChunk {
                score: h.score,
                source: h.source,
                text: h.text,
            })
            .collect();
        Ok(QaAnswer { answer, context })
    }
}
