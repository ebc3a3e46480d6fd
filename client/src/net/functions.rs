//! Remote function invocation and the name-generation call built on it.
//!
//! SYSTEM CONTEXT
//! ==============
//! Hosted functions live under `/functions/v1/{name}`. Requests carry the
//! public key plus a bearer token: the signed-in user's access token when the
//! auth context has a session, the public key otherwise.
//!
//! ERROR HANDLING
//! ==============
//! `generate_names` logs a failure once and hands the same error back to the
//! caller. Nothing is retried.

#[cfg(test)]
#[path = "functions_test.rs"]
mod functions_test;

use contracts::{GROQ_NAME_GENERATOR, HandlerResponse, NameGeneratorParams, ParamsError};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::state::auth_context::AuthContext;

/// Failure of a remote function call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FunctionError {
    #[error("invalid name generator params: {0}")]
    InvalidParams(#[from] ParamsError),
    /// The function answered with a non-success status.
    #[error("{message}")]
    Remote { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("unexpected function response: {0}")]
    Decode(String),
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait FunctionGateway: Send + Sync {
    /// Call function `name` with a JSON `body` and return its JSON reply.
    async fn invoke(&self, name: &str, body: Value) -> Result<Value, FunctionError>;
}

/// Gateway that calls the hosted functions over HTTPS.
pub struct HttpFunctionGateway {
    http: reqwest::Client,
    config: ClientConfig,
    auth: Option<AuthContext>,
}

impl HttpFunctionGateway {
    #[must_use]
    pub fn new(config: ClientConfig, auth: Option<AuthContext>) -> Self {
        Self { http: reqwest::Client::new(), config, auth }
    }

    fn bearer(&self) -> String {
        self.auth
            .as_ref()
            .and_then(AuthContext::access_token)
            .unwrap_or_else(|| self.config.anon_key.clone())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl FunctionGateway for HttpFunctionGateway {
    async fn invoke(&self, name: &str, body: Value) -> Result<Value, FunctionError> {
        let resp = self
            .http
            .post(self.config.function_url(name))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(self.bearer())
            .json(&body)
            .send()
            .await
            .map_err(|e| FunctionError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| FunctionError::Transport(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(FunctionError::Remote { status, message: remote_error_message(name, status, &text) });
        }
        serde_json::from_str(&text).map_err(|e| FunctionError::Decode(e.to_string()))
    }
}

fn remote_error_message(name: &str, status: u16, body: &str) -> String {
    serde_json::from_str::<HandlerResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .unwrap_or_else(|| format!("{name} failed: {status}"))
}

/// Ask the name generator for candidates. The reply is returned as-is.
///
/// # Errors
///
/// Returns [`FunctionError::InvalidParams`] before any call when a required
/// field is blank, otherwise whatever the gateway reported.
pub async fn generate_names<G>(gateway: &G, params: &NameGeneratorParams) -> Result<Value, FunctionError>
where
    G: FunctionGateway + ?Sized,
{
    let result = invoke_generator(gateway, params).await;
    if let Err(e) = &result {
        log::error!("name generation failed: {e}");
    }
    result
}

async fn invoke_generator<G>(gateway: &G, params: &NameGeneratorParams) -> Result<Value, FunctionError>
where
    G: FunctionGateway + ?Sized,
{
    params.validate()?;
    let body = serde_json::to_value(params).map_err(|e| FunctionError::Decode(e.to_string()))?;
    gateway.invoke(GROQ_NAME_GENERATOR, body).await
}
