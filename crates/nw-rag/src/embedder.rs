//! Local hashing embedder
//!
//! Produces deterministic bag-of-words vectors without any network call. It
//! backs the `--local-embeddings` mode and the test suites; retrieval quality
//! is far below a real embedding model.

use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use nw_core::{EmbeddingProvider, Result};

pub const DEFAULT_DIMENSION: usize = 384;

#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    /// Generate simple hash-based embeddings for text
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let normalized: String = text
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();
        let words: Vec<&str> = normalized.split_whitespace().collect();

        let mut embedding = vec![0.0f32; self.dimension];

        for word in &words {
            let hash = hash_of(word);
            let idx1 = (hash % self.dimension as u64) as usize;
            let idx2 = ((hash >> 16) % self.dimension as u64) as usize;
            embedding[idx1] += 1.0;
            embedding[idx2] += 0.5;
        }

        // Add bigram features
        for pair in words.windows(2) {
            let hash = hash_of(&(pair[0], pair[1]));
            let idx = (hash % self.dimension as u64) as usize;
            embedding[idx] += 0.8;
        }

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for val in embedding.iter_mut() {
                *val /= magnitude;
            }
        }

        embedding
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed(t)).collect())
    }

    fn model_id(&self) -> &str {
        "local-hashing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_store::cosine_similarity;

    #[test]
    fn test_deterministic_and_normalized() {
        let embedder = HashingEmbedder::default();
        let a = embedder.embed("Operational semantics of IMP");
        let b = embedder.embed("Operational semantics of IMP");

        assert_eq!(a, b);
        assert_eq!(a.len(), DEFAULT_DIMENSION);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_shared_words_score_higher() {
        let embedder = HashingEmbedder::default();
        let query = embedder.embed("denotational semantics");
        let close = embedder.embed("Denotational semantics maps programs to functions.");
        let far = embedder.embed("Inductive proofs over natural numbers");

        assert!(cosine_similarity(&query, &close) > cosine_similarity(&query, &far));
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let embedder = HashingEmbedder::new(8);
        assert_eq!(embedder.embed("  ...  "), vec![0.0; 8]);
    }
}
