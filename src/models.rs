//! Core data models for the trading command relay

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque page context sent along by the browser extension
pub type PageContext = Map<String, Value>;

//
// ================= Actions =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Click,
    Type,
    Scroll,
    Extract,
}

/// A UI operation the extension should perform on the page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub selector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_after: Option<u64>,
}

impl Action {
    pub fn click(selector: &str, description: &str) -> Self {
        Self {
            action_type: ActionType::Click,
            selector: selector.to_string(),
            text: None,
            value: None,
            description: description.to_string(),
            wait_after: None,
        }
    }

    pub fn type_text(selector: &str, text: &str, description: &str) -> Self {
        Self {
            action_type: ActionType::Type,
            selector: selector.to_string(),
            text: Some(text.to_string()),
            value: None,
            description: description.to_string(),
            wait_after: None,
        }
    }
}

//
// ================= Results =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionResult {
    pub intent: String,
    pub response: String,
    pub actions: Vec<Action>,
    pub analysis: String,
}

impl ActionResult {
    /// Degenerate result returned whenever processing fails
    pub fn error(description: impl fmt::Display) -> Self {
        Self {
            intent: "Error".to_string(),
            response: format!("Sorry, I encountered an error: {}", description),
            actions: vec![],
            analysis: String::new(),
        }
    }
}

/// Normalized response handed back to the caller.
///
/// `Parsed` holds a JSON object the model produced, passed through as-is.
/// `Structured` holds one of the fixed shapes built by the relay itself.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ActionResponse {
    Parsed(Map<String, Value>),
    Structured(ActionResult),
}

impl ActionResponse {
    pub fn intent(&self) -> Option<&str> {
        match self {
            ActionResponse::Parsed(object) => object.get("intent").and_then(Value::as_str),
            ActionResponse::Structured(result) => Some(&result.intent),
        }
    }

    pub fn analysis(&self) -> Option<&str> {
        match self {
            ActionResponse::Parsed(object) => object.get("analysis").and_then(Value::as_str),
            ActionResponse::Structured(result) => Some(&result.analysis),
        }
    }

    /// Typed view of the response, when the model's object matches the contract
    pub fn as_action_result(&self) -> Option<ActionResult> {
        match self {
            ActionResponse::Parsed(object) => {
                serde_json::from_value(Value::Object(object.clone())).ok()
            }
            ActionResponse::Structured(result) => Some(result.clone()),
        }
    }
}

impl From<ActionResult> for ActionResponse {
    fn from(result: ActionResult) -> Self {
        ActionResponse::Structured(result)
    }
}

//
// ================= Mock market data =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    pub price: f64,
    pub change: String,
}

//
// ================= Status =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    pub model: String,
    pub advanced_model: String,
    pub provider: String,
    pub status: String,
}
