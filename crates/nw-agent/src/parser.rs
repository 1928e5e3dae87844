//! Parsing of raw model output into agent decisions

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const FINAL_ANSWER: &str = "Final Answer:";

static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Action: (.*?)[\n]*Action Input:[\s]*(.*)").expect("action regex is valid")
});

/// A tool call proposed by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentAction {
    pub tool: String,
    pub input: String,
    /// Raw model text the action was parsed from
    pub log: String,
}

/// What the model decided in one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Finish(String),
    Action(AgentAction),
    /// Neither a final answer nor an action; carries the raw text
    Malformed(String),
}

/// Parse one model response.
///
/// A final answer wins over an action when both are present; the answer is
/// whatever follows the last `Final Answer:` marker.
pub fn parse_output(text: &str) -> Parsed {
    if let Some(idx) = text.rfind(FINAL_ANSWER) {
        return Parsed::Finish(text[idx + FINAL_ANSWER.len()..].trim().to_string());
    }

    match ACTION_RE.captures(text) {
        Some(caps) => {
            let tool = caps.get(1).map_or("", |m| m.as_str()).trim();
            let input = caps
                .get(2)
                .map_or("", |m| m.as_str())
                .trim()
                .trim_matches(|c| c == '"' || c == ' ');
            Parsed::Action(AgentAction {
                tool: tool.to_string(),
                input: input.to_string(),
                log: text.to_string(),
            })
        }
        None => Parsed::Malformed(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_answer() {
        assert_eq!(
            parse_output("Thought: I now know the final answer\nFinal Answer: 42"),
            Parsed::Finish("42".to_string())
        );
    }

    #[test]
    fn test_last_final_answer_wins() {
        let parsed = parse_output("Final Answer: draft\nFinal Answer:  the real one \n");
        assert_eq!(parsed, Parsed::Finish("the real one".to_string()));
    }

    #[test]
    fn test_final_answer_beats_action() {
        let parsed = parse_output("Action: Search\nAction Input: x\nFinal Answer: done");
        assert_eq!(parsed, Parsed::Finish("done".to_string()));
    }

    #[test]
    fn test_action_with_quoted_input() {
        let text = "Action: Search\nAction Input: \"capital of France\"";
        match parse_output(text) {
            Parsed::Action(action) => {
                assert_eq!(action.tool, "Search");
                assert_eq!(action.input, "capital of France");
                assert_eq!(action.log, text);
            }
            other => panic!("expected an action, got {:?}", other),
        }
    }

    #[test]
    fn test_action_spanning_lines() {
        let text = "Thought: check the notes\nAction: Source Info \n\n\nAction Input:\n  what is a store?\n";
        match parse_output(text) {
            Parsed::Action(action) => {
                assert_eq!(action.tool, "Source Info");
                assert_eq!(action.input, "what is a store?");
            }
            other => panic!("expected an action, got {:?}", other),
        }
    }

    #[test]
    fn test_no_markers_is_malformed() {
        assert_eq!(
            parse_output("no markers present"),
            Parsed::Malformed("no markers present".to_string())
        );
        assert!(matches!(parse_output("Action: Search"), Parsed::Malformed(_)));
    }
}
