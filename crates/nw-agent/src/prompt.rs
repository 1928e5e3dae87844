//! Prompt rendering for the agent

use crate::executor::AgentStep;
use crate::tools::ToolRegistry;

/// Concatenate previous steps as the model wrote them, each followed by its
/// observation and a fresh `Thought:` cue
pub fn render_scratchpad(steps: &[AgentStep]) -> String {
    let mut thoughts = String::new();
    for step in steps {
        thoughts.push_str(&step.action.log);
        thoughts.push_str("\nObservation: ");
        thoughts.push_str(&step.observation);
        thoughts.push_str("\nThought: ");
    }
    thoughts
}

/// Render the full tutor prompt for `query`
pub fn render_prompt(query: &str, tools: &ToolRegistry, steps: &[AgentStep]) -> String {
    let tool_list = tools
        .iter()
        .map(|tool| format!("{}: {}", tool.name(), tool.description()))
        .collect::<Vec<_>>()
        .join("\n");
    let tool_names = tools.names().join(", ");
    let scratchpad = render_scratchpad(steps);

    format!(
        "Answer the following questions as best you can, but speaking as a tutor would speak. \
         You have access to the following tools:\n\
         {tool_list}\n\
         \n\
         Use the following format:\n\
         \n\
         Question: the input question you must answer\n\
         Thought: you should always think about what to do\n\
         Action: the action to take, should be one of [{tool_names}]\n\
         Action Input: the input to the action\n\
         Observation: the result of the action\n\
         ... (this Thought/Action/Action Input/Observation can repeat N times)\n\
         Thought: I now know the final answer\n\
         Final Answer: the final answer to the original input question\n\
         \n\
         Begin! Remember to speak as a teaching assistant when giving your final answer.\n\
         \n\
         Question: {query}\n\
         {scratchpad}"
    )
}
