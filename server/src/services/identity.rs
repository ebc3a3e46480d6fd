//! Identity provider admin API for privileged user mutations.
//!
//! Talks to the hosted auth service with the service-role key. Only the
//! email-confirmation mutation is needed by the functions.
//!
//! The user id comes from an unauthenticated request body, so it is checked
//! with [`is_valid_user_id`] and percent-encoded as a single path segment
//! before it reaches the admin URL.

use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Identity provider connection settings loaded from environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub url: String,
    pub service_role_key: String,
}

impl IdentityConfig {
    /// Load from `SUPABASE_URL` and `SUPABASE_SERVICE_ROLE_KEY`.
    ///
    /// Missing values fall back to empty strings; every admin call will then
    /// fail at the provider, which surfaces as a 400 from the handler.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let url = lookup("SUPABASE_URL").unwrap_or_default();
        let service_role_key = lookup("SUPABASE_SERVICE_ROLE_KEY").unwrap_or_default();
        if url.is_empty() || service_role_key.is_empty() {
            tracing::warn!("SUPABASE_URL or SUPABASE_SERVICE_ROLE_KEY not set; admin calls will fail");
        }
        Self { url: url.trim_end_matches('/').to_string(), service_role_key }
    }

    /// Admin endpoint for a single user.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidUserId`] for ids that could leave the
    /// `/auth/v1/admin/users/` path.
    pub fn admin_user_url(&self, user_id: &str) -> Result<String, IdentityError> {
        if !is_valid_user_id(user_id) {
            return Err(IdentityError::InvalidUserId(user_id.to_owned()));
        }
        Ok(format!("{}/auth/v1/admin/users/{}", self.url, urlencoding::encode(user_id)))
    }
}

/// A user id usable as one admin path segment: non-empty, no `/`, not a
/// dot segment.
#[must_use]
pub fn is_valid_user_id(user_id: &str) -> bool {
    !user_id.is_empty() && user_id != "." && user_id != ".." && !user_id.contains('/')
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The request never produced a response.
    #[error("identity request failed: {0}")]
    Request(String),
    /// The provider answered with a non-success status. Displays as the
    /// provider's own message so handlers can relay it verbatim.
    #[error("{message}")]
    Provider { status: u16, message: String },
    #[error("invalid user id: {0}")]
    InvalidUserId(String),
    #[error("failed to build identity http client: {0}")]
    HttpClientBuild(String),
}

/// Administrative operations on the identity provider.
#[async_trait::async_trait]
pub trait IdentityAdmin: Send + Sync {
    /// Mark the user's email address as confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] if the provider rejects the update or is unreachable.
    async fn confirm_email(&self, user_id: &str) -> Result<(), IdentityError>;
}

/// [`IdentityAdmin`] backed by the Supabase GoTrue admin API.
pub struct SupabaseAdmin {
    http: reqwest::Client,
    config: IdentityConfig,
}

impl SupabaseAdmin {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: IdentityConfig) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| IdentityError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }
}

#[async_trait::async_trait]
impl IdentityAdmin for SupabaseAdmin {
    async fn confirm_email(&self, user_id: &str) -> Result<(), IdentityError> {
        let resp = self
            .http
            .put(self.config.admin_user_url(user_id)?)
            .header("apikey", &self.config.service_role_key)
            .bearer_auth(&self.config.service_role_key)
            .json(&serde_json::json!({ "email_confirm": true }))
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(IdentityError::Provider { status: status.as_u16(), message: provider_message(status, &body) });
        }
        Ok(())
    }
}

/// Extract the provider's error message from a GoTrue error body.
pub(crate) fn provider_message(status: reqwest::StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|root| {
            ["msg", "message", "error_description", "error"]
                .iter()
                .find_map(|key| root.get(*key).and_then(serde_json::Value::as_str).map(str::to_owned))
        });
    if let Some(message) = from_json {
        return message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() { status.to_string() } else { trimmed.to_string() }
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
