//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate sign-in
//! redirects and identity-dependent rendering.
//!
//! DESIGN
//! ======
//! Fields are private and the user is read through the session, so a state
//! with a user but no session (or the reverse) cannot be built.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{Session, User};

/// Authentication state tracking the current session and loading status.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    session: Option<Session>,
    loading: bool,
}

impl AuthState {
    /// State before the initial session has been resolved.
    #[must_use]
    pub fn initial() -> Self {
        Self { session: None, loading: true }
    }

    /// State once the provider has reported `session`.
    #[must_use]
    pub fn resolved(session: Option<Session>) -> Self {
        Self { session, loading: false }
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::initial()
    }
}
