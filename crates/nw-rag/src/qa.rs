//! Retrieval QA responder
//!
//! Embeds the question, pulls the closest units from the index, "stuffs" them
//! into a single prompt and asks the LLM for an answer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use nw_core::{
    DocumentUnit, EmbeddingProvider, Error, GenerationConfig, LLMProvider, Result,
};

use crate::config::RagConfig;
use crate::vector_store::{ScoredUnit, VectorIndex};

/// Answer text plus the units that were placed in the prompt, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QAResponse {
    pub answer: String,
    pub sources: Vec<DocumentUnit>,
}

pub struct RetrievalQA {
    llm: Arc<dyn LLMProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<VectorIndex>,
    top_k: usize,
    temperature: f32,
    max_tokens: u32,
}

impl RetrievalQA {
    pub fn new(
        llm: Arc<dyn LLMProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<VectorIndex>,
        config: &RagConfig,
    ) -> Self {
        Self {
            llm,
            embedder,
            index,
            top_k: config.top_k.max(1),
            temperature: config.qa_temperature,
            max_tokens: config.qa_max_tokens,
        }
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    /// Fetch the `top_k` units closest to `query`
    pub async fn retrieve(&self, query: &str) -> Result<Vec<ScoredUnit>> {
        // Checked first so an empty index never costs a network call
        if self.index.is_empty() {
            return Err(Error::EmptyIndex);
        }
        let embedding = self.embedder.embed_query(query).await?;
        self.index.search(&embedding, self.top_k)
    }

    /// Answer `query` from the indexed documents
    pub async fn answer(&self, query: &str) -> Result<QAResponse> {
        let retrieved = self.retrieve(query).await?;
        debug!(
            query,
            retrieved = retrieved.len(),
            best_score = retrieved.first().map(|r| r.score),
            "retrieved units"
        );

        let sources: Vec<DocumentUnit> = retrieved.into_iter().map(|r| r.unit).collect();
        let prompt = build_prompt(&build_context(&sources), query);

        let config = GenerationConfig {
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
            stop_sequences: Vec::new(),
        };
        let result = self.llm.generate_with_config(&prompt, &config).await?;
        info!(
            model = %result.model_id,
            tokens = ?result.tokens_used,
            sources = sources.len(),
            "answer generated"
        );

        Ok(QAResponse {
            answer: result.text.trim().to_string(),
            sources,
        })
    }
}

/// Join unit texts with blank lines, in retrieval order
pub fn build_context(units: &[DocumentUnit]) -> String {
    units
        .iter()
        .map(DocumentUnit::content)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Fill the "stuff" QA template
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "Use the following pieces of context to answer the question at the end. \
         If you don't know the answer, just say that you don't know, don't try to make up an answer.\n\n\
         {context}\n\n\
         Question: {question}\n\
         Helpful Answer:"
    )
}
