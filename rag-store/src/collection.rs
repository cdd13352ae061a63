//! Collection manager: every indexing run starts from an empty collection.
//!
//! Create first; if the name is taken, delete and create again. The
//! delete-then-create pair is not atomic, so concurrent resets of the same
//! name race and the last creator wins. Callers serialize uploads per
//! collection when that matters.

use tracing::{info, warn};

use crate::config::VectorSpace;
use crate::errors::RagError;
use crate::vector_store::VectorStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionState {
    /// No collection of that name existed.
    Created,
    /// A previous collection was dropped and replaced.
    Recreated,
}

/// Ensures `name` exists with `space` and holds no records.
///
/// # Errors
/// Any failure other than "already exists" on the first create.
pub async fn ensure_fresh_collection(
    store: &dyn VectorStore,
    name: &str,
    space: &VectorSpace,
) -> Result<CollectionState, RagError> {
    match store.create_collection(name, space).await {
        Ok(()) => {
            info!(collection = name, size = space.size, "collection created");
            Ok(CollectionState::Created)
        }
        Err(RagError::CollectionExists(_)) => {
            warn!(collection = name, "collection already exists; recreating it empty");
            store.delete_collection(name).await?;
            store.create_collection(name, space).await?;
            info!(collection = name, size = space.size, "collection recreated");
            Ok(CollectionState::Recreated)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DistanceKind;
    use crate::memory::MemoryVectorStore;
    use crate::record::StoredRecord;

    const SPACE: VectorSpace = VectorSpace {
        size: 2,
        distance: DistanceKind::Cosine,
    };

    #[tokio::test]
    async fn reset_empties_existing_collection() {
        let store = MemoryVectorStore::new();
        assert_eq!(
            ensure_fresh_collection(&store, "c", &SPACE).await.unwrap(),
            CollectionState::Created
        );
        store
            .upsert("c", vec![StoredRecord::new("old", "c", vec![1.0, 0.0])])
            .await
            .unwrap();

        assert_eq!(
            ensure_fresh_collection(&store, "c", &SPACE).await.unwrap(),
            CollectionState::Recreated
        );
        assert_eq!(store.record_count("c").await, Some(0));
        assert_eq!(store.space("c").await, Some(SPACE));

        assert_eq!(
            ensure_fresh_collection(&store, "c", &SPACE).await.unwrap(),
            CollectionState::Recreated
        );
        assert_eq!(store.space("c").await, Some(SPACE));
    }
}
