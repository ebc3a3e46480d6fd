//! Shared request/response contracts for the hosted functions.
//!
//! This crate owns the JSON shapes exchanged between the `client` and the
//! `server` function handlers. Payloads stay open-ended where the callers
//! need pass-through (`NameGeneratorParams::extra`) and strict where the
//! handlers depend on a field being present.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Path prefix under which every hosted function is mounted.
pub const FUNCTIONS_PATH_PREFIX: &str = "/functions/v1";

/// Function that marks a freshly signed-up user's email as confirmed.
pub const AUTO_CONFIRM_SIGNUP: &str = "auto-confirm-signup";

/// Function that proxies name generation to the Groq API.
pub const GROQ_NAME_GENERATOR: &str = "groq-name-generator";

/// Build the mount path for a named function (e.g. `/functions/v1/groq-name-generator`).
#[must_use]
pub fn function_path(name: &str) -> String {
    format!("{FUNCTIONS_PATH_PREFIX}/{name}")
}

// =============================================================================
// NAME GENERATOR PARAMS
// =============================================================================

/// Error returned by [`NameGeneratorParams::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamsError {
    /// A required field was absent, empty, or whitespace-only.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Prompt payload forwarded to `groq-name-generator`.
///
/// Unknown fields land in `extra` and are serialized back out unchanged, so
/// the client can pass generator-specific options without this crate
/// knowing about them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameGeneratorParams {
    /// Which generator produced the prompt (e.g. `"business"`, `"pet"`).
    #[serde(default)]
    pub generator_type: String,
    /// Instructions for the model.
    #[serde(default)]
    pub system_prompt: String,
    /// The user's request.
    #[serde(default)]
    pub user_prompt: String,
    /// Generator-specific fields passed through opaquely.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NameGeneratorParams {
    #[must_use]
    pub fn new(
        generator_type: impl Into<String>,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Self {
        Self {
            generator_type: generator_type.into(),
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra pass-through field.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Check that every required field carries a non-blank value.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::MissingField`] naming the first offending
    /// field by its wire name.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let required = [
            ("generatorType", &self.generator_type),
            ("systemPrompt", &self.system_prompt),
            ("userPrompt", &self.user_prompt),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ParamsError::MissingField(field));
            }
        }
        Ok(())
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Body returned by the function handlers.
///
/// Success carries `message`, failure carries `error`; the HTTP status
/// (200 or 400) tells them apart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HandlerResponse {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()), error: None }
    }

    #[must_use]
    pub fn error(error: impl Into<String>) -> Self {
        Self { message: None, error: Some(error.into()) }
    }
}

/// Success payload of `groq-name-generator`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedNames {
    pub names: Vec<String>,
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
