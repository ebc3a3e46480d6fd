//! Hosted function handlers: `auto-confirm-signup` and `groq-name-generator`.
//!
//! ERROR HANDLING
//! ==============
//! Both handlers answer 200 on success and 400 on every failure, whether
//! the caller sent a bad body or an upstream service failed. Bodies are read
//! as raw bytes so malformed JSON lands in the same 400 `{ error }` shape
//! instead of axum's extractor rejection.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use contracts::{HandlerResponse, NameGeneratorParams, ParamsError};
use serde_json::Value;

use crate::services::identity::{IdentityError, is_valid_user_id};
use crate::services::names::{self, NamesError};
use crate::state::AppState;

pub const NO_USER_MESSAGE: &str = "No user found in request";
pub const CONFIRMED_MESSAGE: &str = "User email confirmed automatically";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    #[error("{0}")]
    InvalidBody(String),
    #[error("No user found in request")]
    MissingUser,
    #[error(transparent)]
    InvalidParams(#[from] ParamsError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Names(#[from] NamesError),
    #[error("name generator is not configured")]
    GeneratorUnavailable,
}

impl FunctionError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidBody(_) => "E_INVALID_BODY",
            Self::MissingUser => "E_MISSING_USER",
            Self::InvalidParams(_) => "E_INVALID_PARAMS",
            Self::Identity(_) => "E_IDENTITY",
            Self::Names(NamesError::Llm(e)) => e.error_code(),
            Self::Names(NamesError::Empty) => "E_NO_NAMES",
            Self::GeneratorUnavailable => "E_GENERATOR_UNAVAILABLE",
        }
    }
}

impl IntoResponse for FunctionError {
    fn into_response(self) -> Response {
        // Upstream faults share the client-error status; see DESIGN.md open questions.
        bad_request(self.to_string())
    }
}

/// The single failure shape every function returns.
pub(crate) fn bad_request(error: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(HandlerResponse::error(error))).into_response()
}

fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, FunctionError> {
    serde_json::from_slice(body).map_err(|e| FunctionError::InvalidBody(e.to_string()))
}

// =============================================================================
// AUTO-CONFIRM SIGNUP
// =============================================================================

/// `user.id` from a signup webhook body. Any other shape (no `user`, a
/// non-object `user`, a non-string or unusable `id`) counts as no user.
fn signup_user_id(payload: &Value) -> Option<&str> {
    payload
        .get("user")
        .and_then(|user| user.get("id"))
        .and_then(Value::as_str)
        .filter(|id| is_valid_user_id(id))
}

/// `POST /functions/v1/auto-confirm-signup`: confirm a new user's email.
pub async fn auto_confirm_signup(State(state): State<AppState>, body: Bytes) -> Response {
    match confirm_signup(&state, &body).await {
        Ok(()) => (StatusCode::OK, Json(HandlerResponse::message(CONFIRMED_MESSAGE))).into_response(),
        Err(e) => {
            tracing::warn!(code = e.error_code(), error = %e, "auto-confirm-signup failed");
            e.into_response()
        }
    }
}

async fn confirm_signup(state: &AppState, body: &[u8]) -> Result<(), FunctionError> {
    let payload: Value = decode(body)?;
    let user_id = signup_user_id(&payload).ok_or(FunctionError::MissingUser)?;
    state.identity.confirm_email(user_id).await?;
    tracing::info!(%user_id, "user email confirmed");
    Ok(())
}

// =============================================================================
// GROQ NAME GENERATOR
// =============================================================================

/// `POST /functions/v1/groq-name-generator`: generate name candidates.
pub async fn groq_name_generator(State(state): State<AppState>, body: Bytes) -> Response {
    match generate_names(&state, &body).await {
        Ok(names) => (StatusCode::OK, Json(names)).into_response(),
        Err(e) => {
            tracing::warn!(code = e.error_code(), error = %e, "groq-name-generator failed");
            e.into_response()
        }
    }
}

async fn generate_names(state: &AppState, body: &[u8]) -> Result<contracts::GeneratedNames, FunctionError> {
    let params: NameGeneratorParams = decode(body)?;
    params.validate()?;
    let llm = state.llm.as_deref().ok_or(FunctionError::GeneratorUnavailable)?;
    Ok(names::generate(llm, &params).await?)
}

#[cfg(test)]
#[path = "functions_test.rs"]
mod tests;
