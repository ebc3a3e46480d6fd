//! Contract of the hosted identity provider as seen by the auth context.
//!
//! SYSTEM CONTEXT
//! ==============
//! The provider owns the session. Consumers never write it; they call one of
//! the operations below and wait for the change notification delivered to
//! every `on_session_change` subscriber.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::types::{AuthError, AuthEvent, Session};
use crate::util::listeners::Subscription;

/// Callback invoked on every session change, with the new session (if any).
pub type SessionCallback = dyn Fn(AuthEvent, Option<&Session>) + Send + Sync;

/// Third-party sign-in providers offered by the site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
}

impl OAuthProvider {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait SessionStore: Send + Sync {
    /// Current session, refreshed or dropped first if it has expired.
    async fn get_session(&self) -> Result<Option<Session>, AuthError>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Register a new identity. Returns the session when the provider signs
    /// the user in immediately, `None` when confirmation is still pending.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Map<String, Value>,
    ) -> Result<Option<Session>, AuthError>;

    /// Start a redirect-based sign-in and return the URL to navigate to.
    async fn sign_in_with_oauth(&self, provider: OAuthProvider, redirect_to: Option<&str>)
    -> Result<String, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    fn on_session_change(&self, callback: Arc<SessionCallback>) -> Subscription;
}

// =============================================================================
// TEST HELPERS
// =============================================================================
