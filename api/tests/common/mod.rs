//! Router fixtures: in-memory store, hashing embedder, recording chat model.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use ai_llm_service::error_handler::{ProviderError, ProviderErrorKind};
use ai_llm_service::{ChatMessage, LlmProvider};
use api::core::app_state::AppState;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use contextor::llm::ChatFuture;
use contextor::{ChatModel, Contextor, ContextorConfig, ContextorError};
use pdf_ingest::RecursiveSplitter;
use rag_store::embed::EmbedFuture;
use rag_store::{
    EmbeddingsProvider, HashingEmbedder, MemoryVectorStore, RagConfig, RagError, RagStore,
};

#[path = "../../../pdf-ingest/tests/common/mod.rs"]
mod pdf_fixtures;
pub use pdf_fixtures::pdf_with_pages;

pub const COLLECTION: &str = "legal_documents";
pub const BOUNDARY: &str = "legal-rag-test-boundary";
pub const CANNED_ANSWER: &str = "Hello! The petitioner is Jane Doe.";

#[derive(Default)]
pub struct RecordingChat {
    pub calls: Mutex<Vec<Vec<ChatMessage>>>,
    pub fail: bool,
}

impl RecordingChat {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn last_user_prompt(&self) -> String {
        self.calls
            .lock()
            .unwrap()
            .last()
            .and_then(|m| m.get(1))
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }
}

impl ChatModel for RecordingChat {
    fn complete<'a>(&'a self, messages: &'a [ChatMessage]) -> ChatFuture<'a> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(messages.to_vec());
            if self.fail {
                return Err(ContextorError::Llm(
                    ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::EmptyChoices).into(),
                ));
            }
            Ok(CANNED_ANSWER.to_string())
        })
    }
}

/// Embedder whose backend is always down.
pub struct DownEmbedder;

impl EmbeddingsProvider for DownEmbedder {
    fn dim(&self) -> usize {
        384
    }

    fn embed_documents<'a>(&'a self, _texts: &'a [String]) -> EmbedFuture<'a, Vec<Vec<f32>>> {
        Box::pin(async { Err(RagError::Qdrant("embedding backend down".into())) })
    }

    fn embed_query<'a>(&'a self, _text: &'a str) -> EmbedFuture<'a, Vec<f32>> {
        Box::pin(async { Err(RagError::Qdrant("embedding backend down".into())) })
    }
}

pub struct Harness {
    pub app: Router,
    pub store: Arc<MemoryVectorStore>,
    pub chat: Arc<RecordingChat>,
}

pub fn harness() -> Harness {
    build(
        Arc::new(HashingEmbedder::new(384)),
        RecordingChat::default(),
        50 * 1024 * 1024,
    )
}

pub fn build(
    embedder: Arc<dyn EmbeddingsProvider>,
    chat: RecordingChat,
    max_body_bytes: usize,
) -> Harness {
    let store = Arc::new(MemoryVectorStore::new());
    let cfg = RagConfig::new_default("http://localhost:6334", COLLECTION);
    let rag = Arc::new(RagStore::new(cfg, store.clone(), embedder).unwrap());
    let chat = Arc::new(chat);
    let contextor = Arc::new(Contextor::new(
        rag.clone(),
        chat.clone(),
        ContextorConfig::default(),
    ));
    let state = Arc::new(AppState::new(
        rag,
        contextor,
        RecursiveSplitter::default(),
        None,
    ));
    Harness {
        app: api::router(state, max_body_bytes),
        store,
        chat,
    }
}

/// `multipart/form-data` request with one part per `(field, filename, bytes)`.
pub fn upload_request(parts: &[(&str, &str, Vec<u8>)]) -> Request<Body> {
    let mut body = Vec::new();
    for (field, filename, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// `application/x-www-form-urlencoded` request carrying `query`.
pub fn ask_request(encoded_query: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ask/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("query={encoded_query}")))
        .unwrap()
}

/// `multipart/form-data` request with plain text fields, as `curl -F` sends them.
pub fn ask_multipart_request(fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri("/ask/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
