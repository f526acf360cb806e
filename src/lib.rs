//! Trading Command Relay
//!
//! Backend for the TradingView assistant extension. It:
//! - Accepts a natural-language command plus optional page context
//! - Classifies the command as simple or complex
//! - Sends complex commands straight to the advanced model
//! - Runs simple commands through a bounded tool-using agent loop
//! - Normalizes every outcome into one `ActionResult`-shaped JSON object
//!
//! COMMAND → CLASSIFY → (DIRECT CALL | TOOL LOOP) → NORMALIZE

pub mod agent;
pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod normalizer;
pub mod prompt;
pub mod tools;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use classifier::{CommandClassifier, CommandComplexity};
