//! Tool-using agent for NotesWise
//!
//! The agent runs a thought/action/observation loop: it renders the question
//! and its previous steps into a prompt, lets the model pick a tool, feeds the
//! tool's observation back and stops at the first final answer.

mod executor;
mod parser;
mod prompt;
mod tools;

#[cfg(test)]
mod tests;

pub use executor::{AgentConfig, AgentExecutor, AgentOutcome, AgentStep, OBSERVATION_STOP};
pub use parser::{parse_output, AgentAction, Parsed};
pub use prompt::{render_prompt, render_scratchpad};
pub use tools::{SearchTool, SourceInfoTool, ToolRegistry, SEARCH_TOOL, SOURCE_INFO_TOOL};

// Re-export core types for convenience
pub use nw_core::{Error, Result, Tool};
