//! Vector store capability set used by the collection manager, indexer and retriever.

use std::{future::Future, pin::Pin};

use crate::config::VectorSpace;
use crate::errors::RagError;
use crate::record::{RagHit, StoredRecord};

/// Boxed future returned by [`VectorStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RagError>> + Send + 'a>>;

/// Minimal vector database interface.
///
/// Implementations must report a name clash on creation as
/// [`RagError::CollectionExists`] and a missing collection on search or
/// upsert as [`RagError::CollectionNotFound`].
pub trait VectorStore: Send + Sync {
    fn create_collection<'a>(&'a self, name: &'a str, space: &'a VectorSpace)
    -> StoreFuture<'a, ()>;

    /// Deleting a missing collection is not an error.
    fn delete_collection<'a>(&'a self, name: &'a str) -> StoreFuture<'a, ()>;

    /// Appends records; returns the number stored.
    fn upsert<'a>(&'a self, name: &'a str, records: Vec<StoredRecord>) -> StoreFuture<'a, usize>;

    /// Top-`top_k` hits by descending similarity.
    fn search<'a>(
        &'a self,
        name: &'a str,
        vector: Vec<f32>,
        top_k: u64,
        exact: bool,
    ) -> StoreFuture<'a, Vec<RagHit>>;

    /// Connectivity check.
    fn ping<'a>(&'a self) -> StoreFuture<'a, ()>;
}
