//! Identity-provider DTOs shared by the session store, auth context and
//! function gateway.
//!
//! DESIGN
//! ======
//! `Session` owns its `User`, so any state holding a session also holds the
//! matching user and cannot hold one without the other.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An authenticated user as returned by the identity provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Provider-assigned identifier.
    pub id: String,
    /// Primary email, when the provider exposes one.
    #[serde(default)]
    pub email: Option<String>,
    /// Free-form metadata supplied at sign-up.
    #[serde(default)]
    pub user_metadata: Map<String, Value>,
}

/// Provider-issued proof of authentication.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Expiry as seconds since the Unix epoch, if known.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

impl Session {
    /// Whether the session has expired at `now` (seconds since the Unix epoch).
    /// Sessions without a known expiry never expire locally.
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Kind of change reported by the session store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// Failure reported by an auth operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The provider rejected the request (bad credentials, duplicate user, ...).
    #[error("{message}")]
    Provider { status: u16, message: String },
    /// The request never produced a usable response.
    #[error("network error: {0}")]
    Transport(String),
    /// The provider answered with a body this client cannot read.
    #[error("unexpected auth response: {0}")]
    Decode(String),
    /// An operation that needs a session was called without one.
    #[error("not signed in")]
    NoSession,
}
