//! Runtime and collection configuration.

use std::str::FromStr;

use crate::errors::RagError;

pub const DEFAULT_COLLECTION: &str = "legal_documents";
pub const DEFAULT_VECTOR_SIZE: usize = 384;
pub const DEFAULT_UPSERT_BATCH: usize = 96;
pub const DEFAULT_TOP_K: u64 = 5;

/// Distance function used for the vector space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceKind {
    /// Cosine distance (recommended for most embeddings).
    Cosine,
    /// Dot product (useful for normalized vectors).
    Dot,
    /// Euclidean distance (L2).
    Euclid,
}

impl FromStr for DistanceKind {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(DistanceKind::Cosine),
            "dot" => Ok(DistanceKind::Dot),
            "euclid" | "euclidean" | "l2" => Ok(DistanceKind::Euclid),
            other => Err(RagError::Config(format!("unknown distance '{other}'"))),
        }
    }
}

/// Describes the vector space of the collection.
///
/// Fixed at creation; every inserted embedding must match `size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VectorSpace {
    /// Dimensionality of vectors.
    pub size: usize,
    /// Distance function.
    pub distance: DistanceKind,
}

impl Default for VectorSpace {
    fn default() -> Self {
        Self {
            size: DEFAULT_VECTOR_SIZE,
            distance: DistanceKind::Cosine,
        }
    }
}

/// Configuration for indexing and retrieval.
#[derive(Clone, Debug)]
pub struct RagConfig {
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Vector size and distance of the collection.
    pub space: VectorSpace,
    /// Chunks per embed call and per upsert.
    pub upsert_batch: usize,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
    /// Number of hits returned by retrieval.
    pub top_k: u64,
}

impl RagConfig {
    /// Creates a sane default config for a given collection name and Qdrant endpoint.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            space: VectorSpace::default(),
            upsert_batch: DEFAULT_UPSERT_BATCH,
            exact_search: false,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Builds the config from environment variables.
    ///
    /// Required: `QDRANT_URL`, `QDRANT_API_KEY`.
    /// Optional: `QDRANT_COLLECTION`, `EMBEDDING_DIM`, `QDRANT_DISTANCE`,
    /// `QDRANT_BATCH_SIZE`, `RAG_EXACT_SEARCH`, `RAG_TOP_K`.
    pub fn from_env() -> Result<Self, RagError> {
        let url = must_env("QDRANT_URL")?;
        let key = must_env("QDRANT_API_KEY")?;

        let mut cfg = Self::new_default(url, env_or("QDRANT_COLLECTION", DEFAULT_COLLECTION));
        cfg.qdrant_api_key = Some(key);
        if let Some(size) = env_parse::<usize>("EMBEDDING_DIM")? {
            cfg.space.size = size;
        }
        if let Ok(d) = std::env::var("QDRANT_DISTANCE") {
            if !d.trim().is_empty() {
                cfg.space.distance = d.parse()?;
            }
        }
        if let Some(batch) = env_parse::<usize>("QDRANT_BATCH_SIZE")? {
            cfg.upsert_batch = batch;
        }
        if let Some(exact) = env_parse::<bool>("RAG_EXACT_SEARCH")? {
            cfg.exact_search = exact;
        }
        if let Some(k) = env_parse::<u64>("RAG_TOP_K")? {
            cfg.top_k = k;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(RagError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(RagError::Config("collection is empty".into()));
        }
        if self.space.size == 0 {
            return Err(RagError::Config("vector size must be > 0".into()));
        }
        if self.upsert_batch == 0 {
            return Err(RagError::Config("upsert_batch must be > 0".into()));
        }
        if self.top_k == 0 {
            return Err(RagError::Config("top_k must be > 0".into()));
        }
        Ok(())
    }
}

fn must_env(name: &'static str) -> Result<String, RagError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(RagError::MissingEnv(name)),
    }
}

fn env_or(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

fn env_parse<T: FromStr>(name: &'static str) -> Result<Option<T>, RagError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| RagError::Config(format!("{name} has an invalid value: {v:?}"))),
        _ => Ok(None),
    }
}
