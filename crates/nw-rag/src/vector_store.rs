//! In-memory vector index
//!
//! The index is built once per set of documents and only read afterwards.
//! Search is exhaustive cosine similarity, so results are exact and
//! deterministic: equal scores keep insertion order.

use nw_core::{DocumentUnit, Error, Result};

#[derive(Debug, Clone)]
struct IndexEntry {
    unit: DocumentUnit,
    embedding: Vec<f32>,
}

/// A retrieved unit with its similarity to the query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredUnit {
    pub unit: DocumentUnit,
    pub score: f32,
}

/// Collection of (unit, embedding) pairs searchable by vector similarity
#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dimension: Option<usize>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit and its embedding.
    ///
    /// All embeddings in one index must have the same dimension.
    pub fn insert(&mut self, unit: DocumentUnit, embedding: Vec<f32>) -> Result<()> {
        if embedding.is_empty() {
            return Err(Error::EmbeddingService(format!(
                "empty embedding for a unit of {}",
                unit.source()
            )));
        }
        match self.dimension {
            Some(dim) if dim != embedding.len() => {
                return Err(Error::EmbeddingService(format!(
                    "embedding dimension {} does not match index dimension {}",
                    embedding.len(),
                    dim
                )));
            }
            Some(_) => {}
            None => self.dimension = Some(embedding.len()),
        }

        self.entries.push(IndexEntry { unit, embedding });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Units in insertion order
    pub fn units(&self) -> impl Iterator<Item = &DocumentUnit> {
        self.entries.iter().map(|e| &e.unit)
    }

    /// Return the `top_k` units most similar to `query`, best first.
    ///
    /// Yields `min(top_k, len)` results. Fails with [`Error::EmptyIndex`] when
    /// there is nothing to search.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<ScoredUnit>> {
        if self.entries.is_empty() {
            return Err(Error::EmptyIndex);
        }
        if let Some(dim) = self.dimension {
            if dim != query.len() {
                return Err(Error::EmbeddingService(format!(
                    "query dimension {} does not match index dimension {}",
                    query.len(),
                    dim
                )));
            }
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, cosine_similarity(query, &entry.embedding)))
            .collect();

        // sort_by is stable, so ties keep insertion order; NaN ranks last
        scored.sort_by(|a, b| rank(b.1).total_cmp(&rank(a.1)));
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(i, score)| ScoredUnit {
                unit: self.entries[i].unit.clone(),
                score,
            })
            .collect())
    }
}

fn rank(score: f32) -> f32 {
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score
    }
}

/// Simple cosine similarity calculation
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
