//! Process configuration
//!
//! Read once at startup. A missing `OPENAI_API_KEY` is fatal: binaries refuse
//! to start rather than failing on the first question.

use crate::error::FinaticError;
use crate::Result;
use std::env;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub port: u16,
    /// `None` leaves the chat-completion call unbounded.
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let openai_api_key = get("OPENAI_API_KEY").ok_or(FinaticError::MissingApiKey)?;

        let openai_model = get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let openai_base_url = get("OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let port = match get("PORT").or_else(|| get("API_PORT")) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| FinaticError::ConfigError(format!("invalid port '{}': {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let request_timeout = match get("LLM_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(FinaticError::ConfigError(format!(
                        "LLM_TIMEOUT_SECS must be a positive number of seconds, got '{}'",
                        raw
                    )))
                }
            },
            None => None,
        };

        Ok(Self {
            openai_api_key,
            openai_model,
            openai_base_url,
            port,
            request_timeout,
        })
    }
}
