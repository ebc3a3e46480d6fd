//! LLM: generation backend for the name generator function.
//!
//! DESIGN
//! ======
//! Configured from environment variables. Handlers depend on the
//! [`LlmChat`] trait only, so the Groq client can be swapped for a mock.

pub mod config;
pub mod groq;
pub mod types;

use std::sync::Arc;

use config::LlmConfig;
pub use types::LlmChat;
use types::LlmError;

/// Build the Groq-backed chat client from environment variables.
///
/// # Errors
///
/// Returns an error if `GROQ_API_KEY` is missing, a value is malformed, or
/// the HTTP client fails to build.
pub fn from_env() -> Result<(Arc<dyn LlmChat>, String), LlmError> {
    let config = LlmConfig::from_env()?;
    let client = groq::GroqClient::new(config)?;
    let model = client.model().to_owned();
    Ok((Arc::new(client), model))
}
