use std::{future::Future, pin::Pin};

use crate::errors::RagError;

pub mod hashing;
pub mod llm;

/// Boxed future returned by [`EmbeddingsProvider`] methods.
pub type EmbedFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RagError>> + Send + 'a>>;

/// Asynchronous embedding provider.
///
/// The same model embeds stored chunks and queries; `dim()` must equal the
/// collection's vector size.
pub trait EmbeddingsProvider: Send + Sync {
    /// Vector length produced by this provider.
    fn dim(&self) -> usize;

    /// Embeds chunk texts for storage. Output order matches input order.
    fn embed_documents<'a>(&'a self, texts: &'a [String]) -> EmbedFuture<'a, Vec<Vec<f32>>>;

    /// Embeds a user question for similarity search.
    fn embed_query<'a>(&'a self, text: &'a str) -> EmbedFuture<'a, Vec<f32>>;
}
