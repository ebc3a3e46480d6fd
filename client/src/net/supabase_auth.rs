//! HTTP adapter for the hosted GoTrue auth API.
//!
//! ARCHITECTURE
//! ============
//! The adapter keeps the one active session in memory and republishes every
//! change to its listeners. It does not persist anything: a page reload
//! starts signed out unless an OAuth redirect fragment is present.
//!
//! ERROR HANDLING
//! ==============
//! Provider rejections keep the provider's own message (`msg`,
//! `error_description`, ...) so the UI can show it unchanged.

#[cfg(test)]
#[path = "supabase_auth_test.rs"]
mod supabase_auth_test;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use super::session_store::{OAuthProvider, SessionCallback, SessionStore};
use super::types::{AuthError, AuthEvent, Session, User};
use crate::config::ClientConfig;
use crate::util::clock::unix_now;
use crate::util::listeners::{Listeners, Subscription};

/// Token grant response body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: User,
}

impl TokenResponse {
    fn into_session(self, now: i64) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_at.or(self.expires_in.map(|secs| now + secs)),
            user: self.user,
        }
    }
}

/// Tokens carried in the URL fragment after an OAuth redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<i64>,
}

pub struct SupabaseAuth {
    http: reqwest::Client,
    config: ClientConfig,
    current: Mutex<Option<Session>>,
    listeners: Listeners<SessionCallback>,
}

impl SupabaseAuth {
    #[must_use]
    pub fn new(config: ClientConfig) -> Arc<Self> {
        Arc::new(Self {
            http: reqwest::Client::new(),
            config,
            current: Mutex::new(None),
            listeners: Listeners::new(),
        })
    }

    fn current_session(&self) -> Option<Session> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the active session and publish the change once.
    fn set_session(&self, event: AuthEvent, session: Option<Session>) {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone_from(&session);
        log::debug!("auth event {event:?}");
        for cb in self.listeners.snapshot() {
            cb(event, session.as_ref());
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, AuthError> {
        let resp = request
            .header("apikey", &self.config.anon_key)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(AuthError::Provider { status, message: provider_message(status, &text) });
        }
        serde_json::from_str(&text).map_err(|e| AuthError::Decode(e.to_string()))
    }

    async fn token_grant(&self, grant_type: &str, body: Value) -> Result<Session, AuthError> {
        let url = self.config.auth_url(&format!("/token?grant_type={grant_type}"));
        let token: TokenResponse = self.send(self.http.post(url).json(&body)).await?;
        Ok(token.into_session(unix_now()))
    }

    async fn fetch_user(&self, access_token: &str) -> Result<User, AuthError> {
        let request = self
            .http
            .get(self.config.auth_url("/user"))
            .bearer_auth(access_token);
        self.send(request).await
    }

    /// Finish a redirect-based sign-in from the URL fragment the provider
    /// sent the browser back with.
    ///
    /// # Errors
    ///
    /// Returns the provider's error when the fragment carries one, and a
    /// decode or transport error if the user cannot be loaded.
    pub async fn complete_oauth_redirect(&self, fragment: &str) -> Result<Session, AuthError> {
        let tokens = parse_redirect_fragment(fragment, unix_now())?;
        let user = self.fetch_user(&tokens.access_token).await?;
        let session = Session {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_at: tokens.expires_at,
            user,
        };
        self.set_session(AuthEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl SessionStore for SupabaseAuth {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.current_session() else {
            return Ok(None);
        };
        if !session.is_expired_at(unix_now()) {
            return Ok(Some(session));
        }

        if let Some(refresh_token) = session.refresh_token.as_deref() {
            match self
                .token_grant("refresh_token", json!({ "refresh_token": refresh_token }))
                .await
            {
                Ok(fresh) => {
                    self.set_session(AuthEvent::TokenRefreshed, Some(fresh.clone()));
                    return Ok(Some(fresh));
                }
                Err(e) => log::warn!("session refresh failed: {e}"),
            }
        }
        self.set_session(AuthEvent::SignedOut, None);
        Ok(None)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self
            .token_grant("password", json!({ "email": email, "password": password }))
            .await?;
        self.set_session(AuthEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Map<String, Value>,
    ) -> Result<Option<Session>, AuthError> {
        let body = json!({ "email": email, "password": password, "data": metadata });
        let raw: Value = self
            .send(self.http.post(self.config.auth_url("/signup")).json(&body))
            .await?;
        let session = signup_session(raw, unix_now())?;
        if let Some(session) = &session {
            self.set_session(AuthEvent::SignedIn, Some(session.clone()));
        }
        Ok(session)
    }

    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: Option<&str>,
    ) -> Result<String, AuthError> {
        authorize_url(&self.config, provider, redirect_to)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.current_session() else {
            return Ok(());
        };
        let resp = self
            .http
            .post(self.config.auth_url("/logout"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        // 401: the provider already considers the token invalid.
        if !(200..300).contains(&status) && status != 401 {
            let text = resp.text().await.unwrap_or_default();
            return Err(AuthError::Provider { status, message: provider_message(status, &text) });
        }
        self.set_session(AuthEvent::SignedOut, None);
        Ok(())
    }

    fn on_session_change(&self, callback: Arc<SessionCallback>) -> Subscription {
        self.listeners.add(callback)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Interpret a sign-up response: a token body means the user is signed in
/// already; a bare user body means confirmation is pending.
fn signup_session(raw: Value, now: i64) -> Result<Option<Session>, AuthError> {
    if raw.get("access_token").is_none() {
        return Ok(None);
    }
    let token: TokenResponse = serde_json::from_value(raw).map_err(|e| AuthError::Decode(e.to_string()))?;
    Ok(Some(token.into_session(now)))
}

pub(crate) fn authorize_url(
    config: &ClientConfig,
    provider: OAuthProvider,
    redirect_to: Option<&str>,
) -> Result<String, AuthError> {
    let mut params = vec![("provider", provider.as_str())];
    if let Some(target) = redirect_to {
        params.push(("redirect_to", target));
    }
    reqwest::Url::parse_with_params(&config.auth_url("/authorize"), &params)
        .map(String::from)
        .map_err(|e| AuthError::Decode(format!("invalid authorize url: {e}")))
}

pub(crate) fn provider_message(status: u16, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|root| {
        ["msg", "message", "error_description", "error"]
            .iter()
            .find_map(|key| root.get(*key).and_then(Value::as_str).map(str::to_owned))
    });
    from_json.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() { format!("auth request failed: {status}") } else { trimmed.to_owned() }
    })
}

/// Parse `#access_token=..&refresh_token=..&expires_in=..` (leading `#` optional).
pub(crate) fn parse_redirect_fragment(fragment: &str, now: i64) -> Result<RedirectTokens, AuthError> {
    let query = fragment.trim_start_matches('#');
    let url = reqwest::Url::parse(&format!("http://redirect.invalid/?{query}"))
        .map_err(|e| AuthError::Decode(format!("invalid redirect fragment: {e}")))?;

    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in = None;
    let mut expires_at = None;
    let mut error = None;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "access_token" => access_token = Some(value.into_owned()),
            "refresh_token" => refresh_token = Some(value.into_owned()),
            "expires_in" => expires_in = value.parse::<i64>().ok(),
            "expires_at" => expires_at = value.parse::<i64>().ok(),
            "error_description" => error = Some(value.into_owned()),
            "error" => {
                error.get_or_insert_with(|| value.into_owned());
            }
            _ => {}
        }
    }

    if let Some(message) = error {
        return Err(AuthError::Provider { status: 400, message });
    }
    let access_token = access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::Decode("redirect fragment has no access_token".into()))?;
    Ok(RedirectTokens { access_token, refresh_token, expires_at: expires_at.or(expires_in.map(|secs| now + secs)) })
}
