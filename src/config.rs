//! Process configuration, read once from the environment at startup

use crate::error::RelayError;
use crate::Result;
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";
const DEFAULT_SECRET_KEY: &str = "your_default_secret_key";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub default_model: String,
    pub advanced_model: String,
    pub request_timeout: Duration,
    /// Not used by any handler yet
    pub secret_key: String,
    pub debug: bool,
    pub host: String,
    pub port: u16,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| RelayError::Config(format!("invalid PORT {:?}: {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match non_empty("LLM_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                RelayError::Config(format!("invalid LLM_TIMEOUT_SECS {:?}: {}", raw, e))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            groq_api_key: non_empty("GROQ_API_KEY"),
            groq_base_url: non_empty("GROQ_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            default_model: non_empty("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            advanced_model: non_empty("GROQ_ADVANCED_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            secret_key: non_empty("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string()),
            debug: lookup("DEBUG").as_deref() == Some("True"),
            host: non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Log filter used when RUST_LOG is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}
