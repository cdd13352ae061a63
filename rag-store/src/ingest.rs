//! Indexer: embed chunks and store them in order.

use std::time::Instant;

use tracing::{debug, info};

use crate::config::RagConfig;
use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;
use crate::record::StoredRecord;
use crate::vector_store::VectorStore;

/// Embeds `chunks` and appends them to `cfg.collection`.
///
/// Batches of `cfg.upsert_batch` run sequentially in chunk order; each batch
/// is one embed call plus one upsert. Every record carries the collection
/// name as its `source`. Returns the number of stored chunks.
///
/// # Errors
/// Embedding or vector store failures abort the run; batches already
/// written stay in the collection.
pub async fn index_chunks(
    cfg: &RagConfig,
    store: &dyn VectorStore,
    embedder: &dyn EmbeddingsProvider,
    chunks: &[String],
) -> Result<usize, RagError> {
    let started = Instant::now();
    let mut stored = 0usize;

    for (i, batch) in chunks.chunks(cfg.upsert_batch).enumerate() {
        let vectors = embedder.embed_documents(batch).await?;
        if vectors.len() != batch.len() {
            return Err(RagError::EmbeddingCount {
                got: vectors.len(),
                want: batch.len(),
            });
        }

        let records: Vec<StoredRecord> = batch
            .iter()
            .zip(vectors)
            .map(|(text, vector)| StoredRecord::new(text.as_str(), cfg.collection.as_str(), vector))
            .collect();

        stored += store.upsert(&cfg.collection, records).await?;
        debug!(batch = i, size = batch.len(), stored, "batch indexed");
    }

    info!(
        collection = %cfg.collection,
        chunks = stored,
        latency_ms = started.elapsed().as_millis(),
        "indexing finished"
    );
    Ok(stored)
}
