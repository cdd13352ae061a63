//! Retriever: embed the question and fetch the top-K chunks.

use tracing::{debug, warn};

use crate::config::RagConfig;
use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;
use crate::record::{RagHit, RagQuery};
use crate::vector_store::VectorStore;

/// Returns up to `query.top_k` hits by descending score. No score threshold.
///
/// A collection that does not exist yet (nothing uploaded) yields no hits.
///
/// # Errors
/// Embedding failures and any other vector store error.
pub async fn rag_context(
    cfg: &RagConfig,
    store: &dyn VectorStore,
    embedder: &dyn EmbeddingsProvider,
    query: RagQuery<'_>,
) -> Result<Vec<RagHit>, RagError> {
    let qv = embedder.embed_query(query.text).await?;

    let hits = match store
        .search(&cfg.collection, qv, query.top_k, cfg.exact_search)
        .await
    {
        Ok(hits) => hits,
        Err(RagError::CollectionNotFound(name)) => {
            warn!(collection = %name, "collection missing; returning empty context");
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    debug!(
        collection = %cfg.collection,
        top_k = query.top_k,
        hits = hits.len(),
        "retrieval finished"
    );
    Ok(hits)
}
