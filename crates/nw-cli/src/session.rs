//! One indexed set of notes and the responders built on it

use std::path::Path;
use std::sync::Arc;

use colored::*;
use tracing::info;

use nw_agent::{AgentConfig, AgentExecutor, AgentOutcome, ToolRegistry};
use nw_core::{EmbeddingProvider, LLMProvider, Result, SearchProvider};
use nw_rag::{DocumentIndexer, QAResponse, RagConfig, RetrievalQA};

use crate::ui::{print_agent_answer, print_answer, print_error};

/// Holds the index for the loaded notes, the QA responder and, when a search
/// backend is configured, the tutor agent
pub struct NotesSession {
    responder: Arc<RetrievalQA>,
    agent: Option<AgentExecutor>,
}

impl NotesSession {
    /// Index `paths` and wire the responders.
    ///
    /// Without a search provider the agent is disabled and only the primary
    /// answer is produced.
    pub async fn build<P: AsRef<Path>>(
        paths: &[P],
        llm: Arc<dyn LLMProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        search: Option<Arc<dyn SearchProvider>>,
        rag_config: &RagConfig,
        agent_config: &AgentConfig,
    ) -> Result<Self> {
        let indexer = DocumentIndexer::new(embedder.clone(), rag_config);
        let index = indexer.index_documents(paths).await?;
        info!(units = index.len(), "notes indexed");

        let responder = Arc::new(RetrievalQA::new(
            llm.clone(),
            embedder,
            Arc::new(index),
            rag_config,
        ));

        let agent = search.map(|search| {
            let tools = ToolRegistry::standard(responder.clone(), search);
            AgentExecutor::new(llm, Arc::new(tools), agent_config.clone())
        });

        Ok(Self { responder, agent })
    }

    pub fn unit_count(&self) -> usize {
        self.responder.index().len()
    }

    pub fn has_agent(&self) -> bool {
        self.agent.is_some()
    }

    /// Primary answer from the notes
    pub async fn answer(&self, query: &str) -> Result<QAResponse> {
        self.responder.answer(query).await
    }

    /// Secondary answer from the tutor agent, `None` when it is disabled
    pub async fn consult_agent(&self, query: &str) -> Result<Option<AgentOutcome>> {
        match &self.agent {
            Some(agent) => agent.run(query).await.map(Some),
            None => Ok(None),
        }
    }
}

/// Answer one question and print both answers.
///
/// A failed agent run is reported without discarding the primary answer.
pub async fn handle_question(session: &NotesSession, query: &str) -> Result<()> {
    println!("{} Reading your notes...", "🔎".blue());
    let response = session.answer(query).await?;
    print_answer(&response);

    if session.has_agent() {
        println!("{} Asking the tutor...", "🤖".blue());
        match session.consult_agent(query).await {
            Ok(Some(outcome)) => print_agent_answer(&outcome),
            Ok(None) => {}
            Err(e) => print_error("Tutor agent failed", &e),
        }
    }
    Ok(())
}
