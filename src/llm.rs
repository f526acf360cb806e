//! Groq chat-completions client
//!
//! The relay only needs `chat_complete(messages, model config) -> text`, so the
//! provider sits behind the `LlmClient` trait and request handlers can run
//! against a substitute implementation.
//! Uses a long-lived reqwest::Client for connection pooling.

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Per-call model settings
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ModelConfig {
    /// Settings for the tool loop
    pub fn standard(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: 0.1,
            max_tokens: 2048,
        }
    }

    /// Settings for direct calls on complex commands
    pub fn advanced(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: 0.1,
            max_tokens: 4096,
        }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    fn provider(&self) -> &'static str;

    async fn chat_complete(&self, messages: &[ChatMessage], config: &ModelConfig)
        -> Result<String>;
}

/// Reusable Groq client (connection-pooled)
pub struct GroqClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GroqClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let api_key = config
            .groq_api_key
            .clone()
            .ok_or_else(|| RelayError::Config("GROQ_API_KEY not configured".to_string()))?;

        Self::new(api_key, config.groq_base_url.clone(), config.request_timeout)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmClient for GroqClient {
    fn provider(&self) -> &'static str {
        "Groq"
    }

    async fn chat_complete(
        &self,
        messages: &[ChatMessage],
        config: &ModelConfig,
    ) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &config.model,
            messages,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };

        debug!(model = %config.model, max_tokens = config.max_tokens, "Calling Groq API");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Groq API request failed: {}", e);
                RelayError::Llm(format!("Groq API request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "Groq API error response: {}", body);
            return Err(RelayError::Llm(format!(
                "Groq API returned {}: {}",
                status,
                provider_error_message(&body)
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Groq response: {}", e);
            RelayError::Llm(format!("Groq parse error: {}", e))
        })?;

        first_choice_text(completion)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn first_choice_text(completion: ChatCompletionResponse) -> Result<String> {
    completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| RelayError::Llm("No choices in Groq response".to_string()))?
        .message
        .content
        .ok_or_else(|| RelayError::Llm("Empty message in Groq response".to_string()))
}

/// Pull `error.message` out of an OpenAI-style error body, else return the body
fn provider_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let messages = vec![ChatMessage::user("show me watchlist")];
        let config = ModelConfig::advanced("llama3-70b-8192");
        let request = ChatCompletionRequest {
            model: &config.model,
            messages: &messages,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "llama3-70b-8192");
        assert_eq!(value["max_tokens"], 4096);
        assert_eq!(value["messages"][0], json!({"role": "user", "content": "show me watchlist"}));
    }

    #[test]
    fn test_first_choice_text() {
        let completion: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "hello"}}],
        }))
        .unwrap();
        assert_eq!(first_choice_text(completion).unwrap(), "hello");

        let empty: ChatCompletionResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(first_choice_text(empty), Err(RelayError::Llm(_))));
    }

    #[test]
    fn test_provider_error_message() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        assert_eq!(provider_error_message(body), "Invalid API Key");
        assert_eq!(provider_error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let config = RelayConfig::from_lookup(|_| None).unwrap();
        assert!(matches!(GroqClient::from_config(&config), Err(RelayError::Config(_))));

        let config = RelayConfig::from_lookup(|key| {
            (key == "GROQ_API_KEY").then(|| "gsk_test".to_string())
        })
        .unwrap();
        let client = GroqClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "https://api.groq.com/openai/v1/chat/completions");
    }
}
