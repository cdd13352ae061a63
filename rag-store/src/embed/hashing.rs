//! Offline embedder: feature hashing over lowercase word tokens.
//!
//! Deterministic and network-free. Texts sharing words score higher under
//! cosine similarity, which is enough for tests and smoke runs.

use std::hash::{DefaultHasher, Hash, Hasher};

use crate::embed::{EmbedFuture, EmbeddingsProvider};

#[derive(Clone, Debug)]
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    /// L2-normalized bag-of-words vector; all zeros for text without words.
    pub fn vector(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dim];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let mut h = DefaultHasher::new();
            token.to_lowercase().hash(&mut h);
            v[(h.finish() % self.dim as u64) as usize] += 1.0;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            v.iter_mut().for_each(|x| *x /= norm);
        }
        v
    }
}

impl EmbeddingsProvider for HashingEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_documents<'a>(&'a self, texts: &'a [String]) -> EmbedFuture<'a, Vec<Vec<f32>>> {
        Box::pin(async move { Ok(texts.iter().map(|t| self.vector(t)).collect()) })
    }

    fn embed_query<'a>(&'a self, text: &'a str) -> EmbedFuture<'a, Vec<f32>> {
        Box::pin(async move { Ok(self.vector(text)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cos(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn shared_words_score_higher() {
        let e = HashingEmbedder::new(384);
        let q = e.vector("Who is the petitioner?");
        let hit = e.vector("Petitioner: Jane Doe");
        let miss = e.vector("Filed on 3 March 2021 in district court");
        assert!(cos(&q, &hit) > cos(&q, &miss));
    }

    #[test]
    fn deterministic_and_normalized() {
        let e = HashingEmbedder::new(16);
        let a = e.vector("Jane Doe");
        assert_eq!(a, e.vector("jane DOE"));
        assert!((cos(&a, &a) - 1.0).abs() < 1e-5);
        assert!(e.vector("  ").iter().all(|x| *x == 0.0));
    }
}
