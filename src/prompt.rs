//! Prompt construction for both routing paths

use crate::models::PageContext;
use crate::tools::{selectors, TradingTool};

pub const NO_CONTEXT_PLACEHOLDER: &str = "No page context available";

/// Wrap a command and its page context in the assistant framing
pub fn build_enhanced_prompt(command: &str, page_context: Option<&PageContext>) -> String {
    let context_str = page_context
        .filter(|ctx| !ctx.is_empty())
        .and_then(|ctx| serde_json::to_string_pretty(ctx).ok())
        .unwrap_or_else(|| NO_CONTEXT_PLACEHOLDER.to_string());

    format!(
        r#"You are a trading assistant helping users analyze TradingView.

User Command: {}
Page Context: {}

Please provide a helpful response and suggest actions if needed."#,
        command, context_str
    )
}

/// Zero-shot ReAct frame for the tool loop.
///
/// `scratchpad` holds every previous model turn followed by its observation.
pub fn build_tool_loop_prompt(question: &str, tools: &[TradingTool], scratchpad: &str) -> String {
    let tool_lines = tools
        .iter()
        .map(|tool| format!("{}: {}", tool.name(), tool.description()))
        .collect::<Vec<_>>()
        .join("\n");

    let tool_names = tools
        .iter()
        .map(|tool| tool.name())
        .collect::<Vec<_>>()
        .join(", ");

    let selector_lines = selectors::ALL
        .iter()
        .map(|(name, selector)| format!("- {}: {}", name, selector))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Answer the following questions as best you can. You have access to the following tools:

{tool_lines}

Known TradingView selectors:
{selector_lines}

Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question

Begin!

Question: {question}
Thought:{scratchpad}"#
    )
}
