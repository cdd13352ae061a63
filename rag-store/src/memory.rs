//! In-process vector store.
//!
//! Brute-force scoring over every record of a collection. Used by tests and
//! local runs without a Qdrant instance; mirrors Qdrant's collection errors.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::debug;

use crate::config::{DistanceKind, VectorSpace};
use crate::errors::RagError;
use crate::record::{RagHit, StoredRecord};
use crate::vector_store::{StoreFuture, VectorStore};

#[derive(Debug)]
struct MemCollection {
    space: VectorSpace,
    records: Vec<StoredRecord>,
}

#[derive(Debug, Default)]
pub struct MemoryVectorStore {
    collections: RwLock<HashMap<String, MemCollection>>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in `name`, `None` if the collection does not exist.
    pub async fn record_count(&self, name: &str) -> Option<usize> {
        self.collections
            .read()
            .await
            .get(name)
            .map(|c| c.records.len())
    }

    /// Schema `name` was created with.
    pub async fn space(&self, name: &str) -> Option<VectorSpace> {
        self.collections.read().await.get(name).map(|c| c.space)
    }

    /// Texts stored in `name`, in insertion order.
    pub async fn texts(&self, name: &str) -> Vec<String> {
        self.collections
            .read()
            .await
            .get(name)
            .map(|c| c.records.iter().map(|r| r.text.clone()).collect())
            .unwrap_or_default()
    }
}

impl VectorStore for MemoryVectorStore {
    fn create_collection<'a>(
        &'a self,
        name: &'a str,
        space: &'a VectorSpace,
    ) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut guard = self.collections.write().await;
            if guard.contains_key(name) {
                return Err(RagError::CollectionExists(name.to_string()));
            }
            guard.insert(
                name.to_string(),
                MemCollection {
                    space: *space,
                    records: Vec::new(),
                },
            );
            Ok(())
        })
    }

    fn delete_collection<'a>(&'a self, name: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.collections.write().await.remove(name);
            Ok(())
        })
    }

    fn upsert<'a>(&'a self, name: &'a str, records: Vec<StoredRecord>) -> StoreFuture<'a, usize> {
        Box::pin(async move {
            let mut guard = self.collections.write().await;
            let coll = guard
                .get_mut(name)
                .ok_or_else(|| RagError::CollectionNotFound(name.to_string()))?;

            if let Some(bad) = records.iter().find(|r| r.vector.len() != coll.space.size) {
                return Err(RagError::VectorSizeMismatch {
                    got: bad.vector.len(),
                    want: coll.space.size,
                });
            }

            let n = records.len();
            for rec in records {
                match coll.records.iter_mut().find(|r| r.id == rec.id) {
                    Some(slot) => *slot = rec,
                    None => coll.records.push(rec),
                }
            }
            debug!(collection = name, points = n, "memory upsert");
            Ok(n)
        })
    }

    fn search<'a>(
        &'a self,
        name: &'a str,
        vector: Vec<f32>,
        top_k: u64,
        _exact: bool,
    ) -> StoreFuture<'a, Vec<RagHit>> {
        Box::pin(async move {
            let guard = self.collections.read().await;
            let coll = guard
                .get(name)
                .ok_or_else(|| RagError::CollectionNotFound(name.to_string()))?;
            if vector.len() != coll.space.size {
                return Err(RagError::VectorSizeMismatch {
                    got: vector.len(),
                    want: coll.space.size,
                });
            }

            let mut scored: Vec<(f32, &StoredRecord)> = coll
                .records
                .iter()
                .map(|r| (similarity(coll.space.distance, &vector, &r.vector), r))
                .collect();
            scored.sort_by(|a, b| b.0.total_cmp(&a.0));
            scored.truncate(top_k as usize);

            Ok(scored
                .into_iter()
                .map(|(score, r)| RagHit::from_payload(score, r.payload()))
                .collect())
        })
    }

    fn ping<'a>(&'a self) -> StoreFuture<'a, ()> {
        Box::pin(async { Ok(()) })
    }
}

/// Higher is more similar for every distance kind.
fn similarity(kind: DistanceKind, a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    match kind {
        DistanceKind::Dot => dot,
        DistanceKind::Cosine => {
            let na = a.iter().map(|x| x * x).sum::<f32>().sqrt();
            let nb = b.iter().map(|x| x * x).sum::<f32>().sqrt();
            if na == 0.0 || nb == 0.0 {
                0.0
            } else {
                dot / (na * nb)
            }
        }
        DistanceKind::Euclid => {
            let d2: f32 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
            -d2.sqrt()
        }
    }
}
