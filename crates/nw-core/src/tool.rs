//! Tool and search provider traits used by the agent

use async_trait::async_trait;

use crate::Result;

/// A capability the agent can call by name.
///
/// The name is what the model writes after `Action:`; the description is shown
/// to the model in the tool list.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Run the tool and return its observation text
    async fn invoke(&self, input: &str) -> Result<String>;
}

/// Trait for web search backends.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a search and return a single text result
    async fn search(&self, query: &str) -> Result<String>;
}
