//! Embedding provider trait

use async_trait::async_trait;

use crate::{Error, Result};

/// Trait for services that turn text into vectors.
///
/// `embed_documents` must return exactly one vector per input, in input order.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single query string
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_documents(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::EmbeddingService("no vector returned for query".to_string()))
    }

    /// Name of the embedding model, for logging
    fn model_id(&self) -> &str;
}
