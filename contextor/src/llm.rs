//! Language model seam used by the synthesizer.

use std::{future::Future, pin::Pin};

use ai_llm_service::{ChatMessage, LlmServiceProfiles};

use crate::error::ContextorError;

/// Boxed future returned by [`ChatModel::complete`].
pub type ChatFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ContextorError>> + Send + 'a>>;

/// Completion-generating model: role-tagged messages in, text out.
pub trait ChatModel: Send + Sync {
    fn complete<'a>(&'a self, messages: &'a [ChatMessage]) -> ChatFuture<'a>;
}

impl ChatModel for LlmServiceProfiles {
    fn complete<'a>(&'a self, messages: &'a [ChatMessage]) -> ChatFuture<'a> {
        Box::pin(async move { Ok(LlmServiceProfiles::complete(self, messages).await?) })
    }
}
