//! Parsing of tool-loop model output
//!
//! The model answers in the `Thought / Action / Action Input` format and ends
//! with `Final Answer:` once it is done.

use crate::error::RelayError;
use crate::Result;

const FINAL_ANSWER: &str = "Final Answer:";
const ACTION: &str = "Action:";
const ACTION_INPUT: &str = "Action Input:";
const OBSERVATION: &str = "Observation:";

#[derive(Debug, Clone, PartialEq)]
pub enum AgentStep {
    Invoke {
        tool: String,
        input: String,
        /// Model text up to the point the observation belongs
        log: String,
    },
    Finish(String),
}

pub fn parse_step(text: &str) -> Result<AgentStep> {
    // Anything the model wrote past its own "Observation:" is invented
    let log = match text.find(&format!("\n{}", OBSERVATION)) {
        Some(idx) => &text[..idx],
        None => text,
    }
    .trim_end();

    let includes_answer = log.contains(FINAL_ANSWER);

    if let Some((tool, input)) = parse_action(log)? {
        if includes_answer {
            return Err(RelayError::AgentOutput(format!(
                "found both an action and a final answer: `{}`",
                text
            )));
        }
        return Ok(AgentStep::Invoke {
            tool,
            input,
            log: log.to_string(),
        });
    }

    if includes_answer {
        let answer = log.rsplit(FINAL_ANSWER).next().unwrap_or_default().trim();
        return Ok(AgentStep::Finish(answer.to_string()));
    }

    Err(RelayError::AgentOutput(format!(
        "missing 'Action:' or 'Final Answer:' in `{}`",
        text
    )))
}

/// Returns `Ok(None)` when no `Action:` line is present
fn parse_action(log: &str) -> Result<Option<(String, String)>> {
    let lines: Vec<&str> = log.lines().collect();

    let Some(action_idx) = lines
        .iter()
        .position(|line| line.trim_start().starts_with(ACTION))
    else {
        return Ok(None);
    };

    let tool = lines[action_idx].trim_start()[ACTION.len()..].trim().to_string();

    let Some(input_offset) = lines[action_idx + 1..]
        .iter()
        .position(|line| line.trim_start().starts_with(ACTION_INPUT))
    else {
        return Err(RelayError::AgentOutput(format!(
            "missing 'Action Input:' after 'Action: {}'",
            tool
        )));
    };
    let input_idx = action_idx + 1 + input_offset;

    let mut input = lines[input_idx].trim_start()[ACTION_INPUT.len()..].to_string();
    for line in &lines[input_idx + 1..] {
        input.push('\n');
        input.push_str(line);
    }

    let input = input.trim().trim_matches('"').to_string();

    Ok(Some((tool, input)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_answer() {
        let step = parse_step(" I now know the final answer\nFinal Answer: Your watchlist has 5 symbols.")
            .unwrap();
        assert_eq!(step, AgentStep::Finish("Your watchlist has 5 symbols.".to_string()));
    }

    #[test]
    fn test_final_answer_keeps_multiline_text() {
        let step = parse_step("Final Answer: Top movers:\n1. TSLA\n2. AMZN\n").unwrap();
        assert_eq!(step, AgentStep::Finish("Top movers:\n1. TSLA\n2. AMZN".to_string()));
    }

    #[test]
    fn test_action_with_quoted_input() {
        let text = " I should read the page first\nAction: ExtractPageData\nAction Input: \"watchlist\"";
        let step = parse_step(text).unwrap();

        assert_eq!(
            step,
            AgentStep::Invoke {
                tool: "ExtractPageData".to_string(),
                input: "watchlist".to_string(),
                log: text.to_string(),
            }
        );
    }

    #[test]
    fn test_hallucinated_observation_is_dropped() {
        let text = "Action: AnalyzeStocks\nAction Input: AAPL, TSLA\nObservation: TSLA is best\nThought: done\nFinal Answer: TSLA";
        let AgentStep::Invoke { tool, input, log } = parse_step(text).unwrap() else {
            panic!("expected tool invocation");
        };

        assert_eq!(tool, "AnalyzeStocks");
        assert_eq!(input, "AAPL, TSLA");
        assert_eq!(log, "Action: AnalyzeStocks\nAction Input: AAPL, TSLA");
    }

    #[test]
    fn test_action_and_answer_together_is_error() {
        let text = "Action: GenerateActions\nAction Input: search\nFinal Answer: done";
        assert!(matches!(parse_step(text), Err(RelayError::AgentOutput(_))));
    }

    #[test]
    fn test_missing_action_input_is_error() {
        let err = parse_step("Thought: hmm\nAction: ExtractPageData").unwrap_err();
        assert!(err.to_string().contains("Action Input"));
    }

    #[test]
    fn test_free_text_is_error() {
        let err = parse_step("Your watchlist contains AAPL and TSLA.").unwrap_err();
        assert!(matches!(err, RelayError::AgentOutput(_)));
    }
}
