//! LLM configuration parsed from environment variables.

use super::types::LlmError;

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_MAX_TOKENS: u32 = 512;
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from process environment variables.
    ///
    /// Required:
    /// - `GROQ_API_KEY`
    ///
    /// Optional:
    /// - `GROQ_MODEL`: default `llama-3.3-70b-versatile`
    /// - `GROQ_BASE_URL`: default Groq OpenAI-compatible endpoint
    /// - `GROQ_TEMPERATURE`: default 0.9
    /// - `GROQ_MAX_TOKENS`: default 512
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or a numeric value is malformed.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LlmConfig::from_env`] but reads values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or a numeric value is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LlmError> {
        let api_key = lookup("GROQ_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey { var: "GROQ_API_KEY".into() })?;

        let model = lookup("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string());
        let base_url = lookup("GROQ_BASE_URL")
            .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let temperature = parse_or("GROQ_TEMPERATURE", lookup("GROQ_TEMPERATURE"), DEFAULT_TEMPERATURE)?;
        let max_tokens = parse_or("GROQ_MAX_TOKENS", lookup("GROQ_MAX_TOKENS"), DEFAULT_MAX_TOKENS)?;
        let timeouts = LlmTimeouts {
            request_secs: parse_or(
                "LLM_REQUEST_TIMEOUT_SECS",
                lookup("LLM_REQUEST_TIMEOUT_SECS"),
                DEFAULT_LLM_REQUEST_TIMEOUT_SECS,
            )?,
            connect_secs: parse_or(
                "LLM_CONNECT_TIMEOUT_SECS",
                lookup("LLM_CONNECT_TIMEOUT_SECS"),
                DEFAULT_LLM_CONNECT_TIMEOUT_SECS,
            )?,
        };

        Ok(Self { api_key, model, base_url, temperature, max_tokens, timeouts })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, LlmError> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse::<T>()
            .map_err(|_| LlmError::ConfigParse(format!("invalid {key}: {v}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
