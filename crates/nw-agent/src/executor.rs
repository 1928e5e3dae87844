//! Agent executor: the bounded thought/action/observation loop

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use nw_core::config::env_parse;
use nw_core::{Error, GenerationConfig, LLMProvider, Result};

use crate::parser::{parse_output, AgentAction, Parsed};
use crate::prompt::render_prompt;
use crate::tools::ToolRegistry;

/// Stop sequence that keeps the model from writing its own observations
pub const OBSERVATION_STOP: &str = "\nObservation:";

/// Configuration for agent runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Upper bound on model calls per run
    pub max_iterations: usize,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stop_sequences: Vec<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            temperature: 0.1,
            max_tokens: 256,
            stop_sequences: vec![OBSERVATION_STOP.to_string()],
        }
    }
}

impl AgentConfig {
    /// Create configuration from environment variables, defaulting every field
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Ok(Self {
            max_iterations: env_parse("AGENT_MAX_ITERATIONS", defaults.max_iterations)?,
            temperature: env_parse("AGENT_TEMPERATURE", defaults.temperature)?,
            max_tokens: env_parse("AGENT_MAX_TOKENS", defaults.max_tokens)?,
            stop_sequences: defaults.stop_sequences,
        })
    }
}

/// One completed tool call and what it returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStep {
    pub action: AgentAction,
    pub observation: String,
}

/// Final answer of a run plus the steps that led to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutcome {
    pub answer: String,
    pub steps: Vec<AgentStep>,
}

pub struct AgentExecutor {
    llm: Arc<dyn LLMProvider>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
}

impl AgentExecutor {
    pub fn new(llm: Arc<dyn LLMProvider>, tools: Arc<ToolRegistry>, config: AgentConfig) -> Self {
        Self { llm, tools, config }
    }

    fn max_iterations(&self) -> usize {
        self.config.max_iterations.max(1)
    }

    fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
            stop_sequences: self.config.stop_sequences.clone(),
        }
    }

    /// Resolve `query`, calling tools until the model gives a final answer.
    ///
    /// Fails with [`Error::AgentExhausted`] when `max_iterations` model calls
    /// pass without one. Parse, tool and generation failures end the run.
    pub async fn run(&self, query: &str) -> Result<AgentOutcome> {
        let start = Instant::now();
        let max_iterations = self.max_iterations();
        let generation = self.generation_config();
        let mut steps: Vec<AgentStep> = Vec::new();

        for iteration in 1..=max_iterations {
            let prompt = render_prompt(query, &self.tools, &steps);
            debug!(iteration, prompt_len = prompt.len(), "agent thinking");

            let result = self.llm.generate_with_config(&prompt, &generation).await?;
            let text = truncate_at_stop(&result.text, &self.config.stop_sequences);

            match parse_output(text) {
                Parsed::Finish(answer) => {
                    info!(
                        iteration,
                        steps = steps.len(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "agent finished"
                    );
                    return Ok(AgentOutcome { answer, steps });
                }
                Parsed::Action(action) => {
                    let tool = self.tools.resolve(&action.tool)?;
                    info!(iteration, tool = %action.tool, input = %action.input, "agent acting");

                    let observation = tool.invoke(&action.input).await?;
                    debug!(iteration, observation_len = observation.len(), "agent observed");
                    steps.push(AgentStep {
                        action,
                        observation,
                    });
                }
                Parsed::Malformed(raw) => {
                    warn!(iteration, "agent output could not be parsed");
                    return Err(Error::Parse(raw));
                }
            }
        }

        warn!(iterations = max_iterations, "agent gave up without a final answer");
        Err(Error::AgentExhausted {
            iterations: max_iterations,
        })
    }
}

/// Cut `text` at the earliest stop sequence, if any occurs
fn truncate_at_stop<'a>(text: &'a str, stops: &[String]) -> &'a str {
    stops
        .iter()
        .filter(|s| !s.is_empty())
        .filter_map(|s| text.find(s.as_str()))
        .min()
        .map_or(text, |idx| &text[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_at_stop() {
        let stops = vec![OBSERVATION_STOP.to_string()];
        assert_eq!(
            truncate_at_stop("Action: Search\nAction Input: x\nObservation: made up", &stops),
            "Action: Search\nAction Input: x"
        );
        assert_eq!(truncate_at_stop("Final Answer: 1", &stops), "Final Answer: 1");
        assert_eq!(truncate_at_stop("abc", &[String::new()]), "abc");
    }

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert_eq!(config.max_iterations, 15);
        assert_eq!(config.stop_sequences, vec!["\nObservation:".to_string()]);
        assert!((config.temperature - 0.1).abs() < f32::EPSILON);
    }
}
