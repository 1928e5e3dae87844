//! Document indexer: load, split, embed and store document units

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use nw_core::{DocumentUnit, EmbeddingProvider, Error, Result};

use crate::config::RagConfig;
use crate::loader::load_document;
use crate::splitter::TextSplitter;
use crate::vector_store::VectorIndex;

/// Builds a [`VectorIndex`] from a set of document paths
pub struct DocumentIndexer {
    embedder: Arc<dyn EmbeddingProvider>,
    splitter: TextSplitter,
    batch_size: usize,
}

impl DocumentIndexer {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, config: &RagConfig) -> Self {
        Self {
            embedder,
            splitter: TextSplitter::new(config.chunk_size, config.chunk_overlap),
            batch_size: config.embed_batch_size.max(1),
        }
    }

    /// Load one document and split each page into units, in page order
    pub fn split_document(&self, path: &Path) -> Result<Vec<DocumentUnit>> {
        let pages = load_document(path)?;
        let units: Vec<DocumentUnit> = pages
            .iter()
            .flat_map(|page| {
                self.splitter
                    .split_text(&page.text)
                    .into_iter()
                    .map(move |chunk| DocumentUnit::new(chunk, page.source.clone(), page.page))
            })
            .collect();

        if units.is_empty() {
            warn!(source = %path.display(), "document contains no extractable text");
        }
        Ok(units)
    }

    /// Index every document in order.
    ///
    /// All documents are loaded and split before any embedding request is
    /// made; the first failure aborts the whole call and no partial index is
    /// returned.
    pub async fn index_documents<P: AsRef<Path>>(&self, paths: &[P]) -> Result<VectorIndex> {
        if paths.is_empty() {
            warn!("no documents given, the index will be empty");
        }

        let mut units = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let document_units = self.split_document(path)?;
            info!(
                source = %path.display(),
                units = document_units.len(),
                "document split"
            );
            units.extend(document_units);
        }

        let mut index = VectorIndex::new();
        for batch in units.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|u| u.content().to_string()).collect();
            let embeddings = self.embedder.embed_documents(&texts).await?;
            if embeddings.len() != batch.len() {
                return Err(Error::EmbeddingService(format!(
                    "expected {} embeddings, got {}",
                    batch.len(),
                    embeddings.len()
                )));
            }
            for (unit, embedding) in batch.iter().cloned().zip(embeddings) {
                index.insert(unit, embedding)?;
            }
            debug!(batch = batch.len(), indexed = index.len(), "embedded batch");
        }

        info!(
            documents = paths.len(),
            units = index.len(),
            model = self.embedder.model_id(),
            "indexing complete"
        );
        Ok(index)
    }
}
