//! Provider-neutral chat and embedding request types.

use serde::Serialize;

/// Role of a single chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A role-tagged chat message.
///
/// Serializes as `{ "role": "system", "content": "..." }`, the shape shared
/// by OpenAI-compatible APIs and Ollama `/api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Why a text is being embedded.
///
/// Cohere models are trained with separate document/query input types;
/// other providers ignore this hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedPurpose {
    /// Passages stored in the vector index.
    Document,
    /// A user question used for similarity search.
    Query,
}

impl EmbedPurpose {
    /// Cohere `input_type` value.
    pub fn cohere_input_type(self) -> &'static str {
        match self {
            EmbedPurpose::Document => "search_document",
            EmbedPurpose::Query => "search_query",
        }
    }
}
