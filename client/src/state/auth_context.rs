//! Process-wide authentication context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Built once at startup around a `SessionStore` and handed to every consumer
//! explicitly (the Leptos tree receives it through `provide_context`).
//!
//! DESIGN
//! ======
//! The session store is the only writer. Operations forward to the store and
//! return its result; the state moves only when the store's change
//! notification arrives, and each notification replaces the whole state under
//! one lock so readers never see a half-applied change.
//!
//! The store callback holds a weak reference to the context state, so the
//! store never keeps a dropped context alive. `shutdown` (or dropping the last
//! clone) ends the store subscription.

#[cfg(test)]
#[path = "auth_context_test.rs"]
mod auth_context_test;

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{Map, Value};

use super::auth::AuthState;
use crate::net::session_store::{OAuthProvider, SessionStore};
use crate::net::types::{AuthError, AuthEvent, Session};
use crate::util::listeners::{Listeners, Subscription};

/// Callback invoked with the new state after every change.
pub type StateCallback = dyn Fn(&AuthState) + Send + Sync;

#[derive(Default)]
struct Inner {
    state: Mutex<AuthState>,
    listeners: Listeners<StateCallback>,
}

impl Inner {
    fn replace(&self, next: AuthState) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            *state = next.clone();
        }
        for cb in self.listeners.snapshot() {
            cb(&next);
        }
    }

    /// Apply the initial lookup unless a store notification already resolved
    /// the state.
    fn resolve_initial(&self, session: Option<Session>) -> bool {
        let next = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if !state.is_loading() {
                return false;
            }
            *state = AuthState::resolved(session);
            state.clone()
        };
        for cb in self.listeners.snapshot() {
            cb(&next);
        }
        true
    }

    fn snapshot(&self) -> AuthState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Shared handle to the authentication state. Clones share the same state.
#[derive(Clone)]
pub struct AuthContext {
    store: Arc<dyn SessionStore>,
    inner: Arc<Inner>,
    store_subscription: Arc<Mutex<Option<Subscription>>>,
}

impl AuthContext {
    /// Subscribe to `store` and start in the loading state. Call
    /// [`initialize`](Self::initialize) to resolve the initial session.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let inner = Arc::new(Inner::default());
        let weak = Arc::downgrade(&inner);
        let subscription = store.on_session_change(Arc::new(move |event: AuthEvent, session: Option<&Session>| {
            if let Some(inner) = weak.upgrade() {
                log::debug!("session change: {event:?}");
                inner.replace(AuthState::resolved(session.cloned()));
            }
        }));
        Self { store, inner, store_subscription: Arc::new(Mutex::new(Some(subscription))) }
    }

    /// Resolve the initial session. A change notification that arrived first
    /// is kept and the lookup result discarded. A failed lookup resolves to
    /// signed out.
    pub async fn initialize(&self) -> AuthState {
        let session = match self.store.get_session().await {
            Ok(session) => session,
            Err(e) => {
                log::error!("failed to load initial session: {e}");
                None
            }
        };
        if !self.inner.resolve_initial(session) {
            log::debug!("initial session superseded by change notification");
        }
        self.state()
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.inner.snapshot()
    }

    /// Bearer token of the active session, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.state().session().map(|s| s.access_token.clone())
    }

    pub fn subscribe(&self, callback: impl Fn(&AuthState) + Send + Sync + 'static) -> Subscription {
        self.inner.listeners.add(Arc::new(callback))
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// # Errors
    ///
    /// Returns the provider's rejection (invalid credentials) or a transport
    /// failure.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.store
            .sign_in_with_password(email, password)
            .await
            .map(|_| ())
            .inspect_err(|e| log::warn!("sign-in failed: {e}"))
    }

    /// # Errors
    ///
    /// Returns the provider's rejection (duplicate user, weak password) or a
    /// transport failure.
    pub async fn sign_up(&self, email: &str, password: &str, metadata: Map<String, Value>) -> Result<(), AuthError> {
        self.store
            .sign_up(email, password, metadata)
            .await
            .map(|_| ())
            .inspect_err(|e| log::warn!("sign-up failed: {e}"))
    }

    /// Start the Google redirect flow and return the URL to navigate to. Only
    /// initiation is reported here; completion arrives as a notification
    /// after the redirect round trip.
    ///
    /// # Errors
    ///
    /// Returns an error when the authorize URL cannot be produced.
    pub async fn sign_in_with_google(&self, redirect_to: Option<&str>) -> Result<String, AuthError> {
        self.store
            .sign_in_with_oauth(OAuthProvider::Google, redirect_to)
            .await
            .inspect_err(|e| log::warn!("google sign-in failed: {e}"))
    }

    /// # Errors
    ///
    /// Returns the failure when the provider did not confirm the sign-out; the
    /// local session is kept in that case.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.store
            .sign_out()
            .await
            .inspect_err(|e| log::error!("sign-out failed: {e}"))
    }

    /// Stop listening to the session store. Later notifications no longer
    /// change this context.
    pub fn shutdown(&self) {
        let subscription = self
            .store_subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(subscription) = subscription {
            subscription.unsubscribe();
        }
    }
}
