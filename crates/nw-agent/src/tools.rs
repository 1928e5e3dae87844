//! The agent's tools and the registry that names them

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use nw_core::{Error, Result, SearchProvider, Tool};
use nw_rag::{build_context, RetrievalQA};

pub const SOURCE_INFO_TOOL: &str = "Source Info";
pub const SEARCH_TOOL: &str = "Search";

/// Consults the indexed lecture notes through the retrieval QA responder
pub struct SourceInfoTool {
    responder: Arc<RetrievalQA>,
}

impl SourceInfoTool {
    pub fn new(responder: Arc<RetrievalQA>) -> Self {
        Self { responder }
    }
}

#[async_trait]
impl Tool for SourceInfoTool {
    fn name(&self) -> &str {
        SOURCE_INFO_TOOL
    }

    fn description(&self) -> &str {
        "Useful for when you need to consult information within your knowledge base. \
         Use this before the other tool search."
    }

    /// The observation is the consulted unit texts; the generated answer is
    /// only logged.
    async fn invoke(&self, input: &str) -> Result<String> {
        let response = self.responder.answer(input).await?;
        info!(
            tool = SOURCE_INFO_TOOL,
            answer = %response.answer,
            sources = response.sources.len(),
            "knowledge base consulted"
        );
        Ok(build_context(&response.sources))
    }
}

/// Looks things up on the web
pub struct SearchTool {
    provider: Arc<dyn SearchProvider>,
}

impl SearchTool {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        SEARCH_TOOL
    }

    fn description(&self) -> &str {
        "Useful for when you need to consult information outside of your knowledge base."
    }

    async fn invoke(&self, input: &str) -> Result<String> {
        self.provider.search(input).await
    }
}

/// Name to tool mapping, kept in registration order for prompt rendering
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two-tool set the tutor agent works with
    pub fn standard(responder: Arc<RetrievalQA>, search: Arc<dyn SearchProvider>) -> Self {
        Self {
            tools: vec![
                Arc::new(SourceInfoTool::new(responder)),
                Arc::new(SearchTool::new(search)),
            ],
        }
    }

    /// Add a tool; names must be unique
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        if self.get(tool.name()).is_some() {
            return Err(Error::Configuration(format!(
                "tool `{}` is already registered",
                tool.name()
            )));
        }
        self.tools.push(tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Look up `name`, failing with [`Error::UnknownTool`]
    pub fn resolve(&self, name: &str) -> Result<&Arc<dyn Tool>> {
        self.get(name).ok_or_else(|| Error::UnknownTool {
            name: name.to_string(),
            available: self.names().join(", "),
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.iter()
    }
}
