//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! This facade concentrates all Qdrant interactions behind [`VectorStore`],
//! hiding away the verbose builder pattern and keeping the rest of the
//! crate decoupled from `qdrant-client`.

use std::collections::HashMap;

use qdrant_client::qdrant::{
    CreateCollectionBuilder, DeleteCollectionBuilder, Distance, PointStruct, SearchParamsBuilder,
    SearchPointsBuilder, UpsertPointsBuilder, Value as QValue, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant, QdrantError};
use tracing::{debug, info};

use crate::config::{DistanceKind, RagConfig, VectorSpace};
use crate::errors::RagError;
use crate::record::{RagHit, StoredRecord};
use crate::vector_store::{StoreFuture, VectorStore};

/// A facade over the Qdrant gRPC client.
pub struct QdrantFacade {
    client: Qdrant,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// Uses the builder-based API of `qdrant-client` with optional API key
    /// authentication. No request is sent until the first operation.
    pub fn new(cfg: &RagConfig) -> Result<Self, RagError> {
        cfg.validate()?;

        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| RagError::Qdrant(format!("client build: {e}")))?;

        Ok(Self { client })
    }
}

impl VectorStore for QdrantFacade {
    fn create_collection<'a>(
        &'a self,
        name: &'a str,
        space: &'a VectorSpace,
    ) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            info!(
                collection = name,
                size = space.size,
                distance = ?space.distance,
                "creating collection"
            );
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(name).vectors_config(VectorParamsBuilder::new(
                        space.size as u64,
                        to_distance(space.distance),
                    )),
                )
                .await
                .map_err(|e| classify("create_collection", name, e))?;
            Ok(())
        })
    }

    fn delete_collection<'a>(&'a self, name: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            info!(collection = name, "deleting collection");
            let res = self
                .client
                .delete_collection(DeleteCollectionBuilder::new(name))
                .await
                .map_err(|e| classify("delete_collection", name, e))?;
            debug!(collection = name, deleted = res.result, "delete_collection done");
            Ok(())
        })
    }

    fn upsert<'a>(&'a self, name: &'a str, records: Vec<StoredRecord>) -> StoreFuture<'a, usize> {
        Box::pin(async move {
            if records.is_empty() {
                debug!("No points provided for upsert");
                return Ok(0);
            }

            let mut points = Vec::with_capacity(records.len());
            for rec in records {
                let payload: Payload = rec
                    .payload()
                    .try_into()
                    .map_err(|e| RagError::Qdrant(format!("payload convert: {e}")))?;
                points.push(PointStruct::new(rec.id, rec.vector, payload));
            }
            let n = points.len();

            // `wait` makes the points searchable as soon as the call returns.
            self.client
                .upsert_points(UpsertPointsBuilder::new(name, points).wait(true))
                .await
                .map_err(|e| classify("upsert_points", name, e))?;

            debug!(collection = name, points = n, "upsert completed");
            Ok(n)
        })
    }

    fn search<'a>(
        &'a self,
        name: &'a str,
        vector: Vec<f32>,
        top_k: u64,
        exact: bool,
    ) -> StoreFuture<'a, Vec<RagHit>> {
        Box::pin(async move {
            debug!(collection = name, top_k, exact, "searching");

            let mut builder = SearchPointsBuilder::new(name, vector, top_k).with_payload(true);
            if exact {
                builder = builder.params(SearchParamsBuilder::default().exact(true));
            }

            let res = self
                .client
                .search_points(builder)
                .await
                .map_err(|e| classify("search_points", name, e))?;

            let hits: Vec<RagHit> = res
                .result
                .into_iter()
                .map(|p| RagHit::from_payload(p.score, qpayload_to_json(p.payload)))
                .collect();

            debug!(collection = name, hits = hits.len(), "search completed");
            Ok(hits)
        })
    }

    fn ping<'a>(&'a self) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let reply = self
                .client
                .health_check()
                .await
                .map_err(|e| RagError::Qdrant(format!("health_check: {e}")))?;
            debug!(version = %reply.version, "qdrant reachable");
            Ok(())
        })
    }
}

fn to_distance(kind: DistanceKind) -> Distance {
    match kind {
        DistanceKind::Cosine => Distance::Cosine,
        DistanceKind::Dot => Distance::Dot,
        DistanceKind::Euclid => Distance::Euclid,
    }
}

/// Maps server messages onto the typed collection errors.
fn classify(op: &str, collection: &str, err: QdrantError) -> RagError {
    classify_message(op, collection, &err.to_string())
}

fn classify_message(op: &str, collection: &str, msg: &str) -> RagError {
    if msg.contains("already exists") {
        RagError::CollectionExists(collection.to_string())
    } else if msg.contains("doesn't exist") || msg.contains("Not found") {
        RagError::CollectionNotFound(collection.to_string())
    } else {
        RagError::Qdrant(format!("{op}: {msg}"))
    }
}

/// Converts a Qdrant payload into a JSON object, nested values included.
fn qpayload_to_json(p: HashMap<String, QValue>) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> =
        p.into_iter().map(|(k, v)| (k, v.into_json())).collect();
    serde_json::Value::Object(map)
}
