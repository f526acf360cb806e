//! Trading agent - routes a command to the direct path or the tool loop
//!
//! COMMAND → CLASSIFY → (DIRECT CALL | TOOL LOOP) → NORMALIZE

use crate::classifier::{CommandClassifier, CommandComplexity};
use crate::config::RelayConfig;
use crate::llm::{ChatMessage, GroqClient, LlmClient, ModelConfig};
use crate::models::{ActionResponse, ActionResult, ModelInfo, PageContext};
use crate::normalizer::{parse_agent_response, parse_llm_response};
use crate::prompt::{build_enhanced_prompt, build_tool_loop_prompt};
use crate::tools::TradingTool;
use crate::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub mod react;

use react::AgentStep;

const MAX_TOOL_ITERATIONS: usize = 3;

pub const ITERATION_LIMIT_MESSAGE: &str = "Agent stopped due to iteration limit or time limit.";

pub struct TradingAgent {
    llm: Arc<dyn LlmClient>,
    default_model: ModelConfig,
    advanced_model: ModelConfig,
}

impl TradingAgent {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        default_model: ModelConfig,
        advanced_model: ModelConfig,
    ) -> Self {
        Self {
            llm,
            default_model,
            advanced_model,
        }
    }

    /// Build the agent on top of the Groq client; fails without an API key
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let client = GroqClient::from_config(config)?;

        Ok(Self::new(
            Arc::new(client),
            ModelConfig::standard(config.default_model.clone()),
            ModelConfig::advanced(config.advanced_model.clone()),
        ))
    }

    /// Process a command end to end. Failures become an `Error` result.
    pub async fn process_command(
        &self,
        command: &str,
        page_context: Option<&PageContext>,
    ) -> ActionResponse {
        match self.route(command, page_context).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Command processing failed");
                ActionResult::error(e).into()
            }
        }
    }

    async fn route(
        &self,
        command: &str,
        page_context: Option<&PageContext>,
    ) -> Result<ActionResponse> {
        let prompt = build_enhanced_prompt(command, page_context);
        let complexity = CommandClassifier::classify(command);

        info!(?complexity, "Routing command");

        match complexity {
            CommandComplexity::Complex => self.run_direct(&prompt).await,
            CommandComplexity::Simple => {
                let answer = self.run_tool_loop(&prompt).await?;
                Ok(parse_agent_response(&answer))
            }
        }
    }

    /// Single exchange with the advanced model, no tools
    pub async fn run_direct(&self, prompt: &str) -> Result<ActionResponse> {
        let text = self
            .llm
            .chat_complete(&[ChatMessage::user(prompt)], &self.advanced_model)
            .await?;

        debug!(chars = text.len(), "Direct call returned");

        Ok(parse_llm_response(&text))
    }

    /// Bounded ReAct loop over the default model
    pub async fn run_tool_loop(&self, question: &str) -> Result<String> {
        let mut scratchpad = String::new();

        for iteration in 1..=MAX_TOOL_ITERATIONS {
            let prompt = build_tool_loop_prompt(question, &TradingTool::ALL, &scratchpad);
            let output = self
                .llm
                .chat_complete(&[ChatMessage::user(prompt)], &self.default_model)
                .await?;

            match react::parse_step(&output)? {
                AgentStep::Finish(answer) => {
                    debug!(iteration, "Agent produced final answer");
                    return Ok(answer);
                }
                AgentStep::Invoke { tool, input, log } => {
                    let observation = match TradingTool::from_name(&tool) {
                        Some(selected) => {
                            debug!(iteration, tool = selected.name(), %input, "Invoking tool");
                            selected.invoke(&input)?
                        }
                        None => {
                            warn!(iteration, %tool, "Model requested unknown tool");
                            format!(
                                "{} is not a valid tool, try one of [{}].",
                                tool,
                                TradingTool::names()
                            )
                        }
                    };

                    scratchpad.push_str(&format!("{}\nObservation: {}\nThought:", log, observation));
                }
            }
        }

        warn!(max_iterations = MAX_TOOL_ITERATIONS, "Agent exhausted iterations without finishing");
        Ok(ITERATION_LIMIT_MESSAGE.to_string())
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            model: self.default_model.model.clone(),
            advanced_model: self.advanced_model.model.clone(),
            provider: self.llm.provider().to_string(),
            status: "active".to_string(),
        }
    }

    /// Live round trip with a trivial prompt
    pub async fn check_connection(&self) -> bool {
        let check_config = ModelConfig {
            max_tokens: 10,
            ..self.default_model.clone()
        };

        match self.llm.chat_complete(&[ChatMessage::user("test")], &check_config).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "LLM connection check failed");
                false
            }
        }
    }
}

/// Agent as seen by the HTTP layer: built once at startup, possibly not at all
#[derive(Clone)]
pub enum AgentSlot {
    Ready(Arc<TradingAgent>),
    Unavailable(String),
}

impl AgentSlot {
    pub fn from_init(result: Result<TradingAgent>) -> Self {
        match result {
            Ok(agent) => AgentSlot::Ready(Arc::new(agent)),
            Err(e) => AgentSlot::Unavailable(e.to_string()),
        }
    }

    pub fn agent(&self) -> Option<&Arc<TradingAgent>> {
        match self {
            AgentSlot::Ready(agent) => Some(agent),
            AgentSlot::Unavailable(_) => None,
        }
    }
}
