//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages that need a signed-in user apply identical unauthenticated redirect
//! behavior through `use_require_auth`.
//!
//! DESIGN
//! ======
//! The redirect decision lives in `AuthGuard`, which only looks at the pair
//! `(user id, loading)`. Re-renders with an unchanged pair never navigate
//! again, and nothing navigates while the initial session is loading.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::RefCell;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::types::User;
use crate::state::auth::AuthState;
use crate::state::auth_context::AuthContext;

/// Where unauthenticated visitors are sent when no target is given.
pub const SIGN_IN_PATH: &str = "/sign-in";

/// Auth has loaded and there is no user.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.is_loading() && state.user().is_none()
}

/// Redirect decision with change detection on `(user id, loading)`.
#[derive(Debug, Clone)]
pub struct AuthGuard {
    redirect_to: String,
    last: Option<(Option<String>, bool)>,
}

impl AuthGuard {
    #[must_use]
    pub fn new(redirect_to: Option<&str>) -> Self {
        Self { redirect_to: redirect_to.unwrap_or(SIGN_IN_PATH).to_owned(), last: None }
    }

    /// Feed the latest state. Returns the redirect target only when this
    /// observation moves the guard into the unauthenticated state.
    pub fn observe(&mut self, state: &AuthState) -> Option<&str> {
        let key = (state.user().map(|u| u.id.clone()), state.is_loading());
        if self.last.as_ref() == Some(&key) {
            return None;
        }
        self.last = Some(key);
        should_redirect_unauth(state).then_some(self.redirect_to.as_str())
    }
}

// =============================================================================
// LEPTOS GLUE
// =============================================================================

/// Mirror `auth` into a signal and provide both to the component tree.
pub fn provide_auth_context(auth: AuthContext) -> RwSignal<AuthState> {
    let signal = RwSignal::new(auth.state());
    let subscription = auth.subscribe(move |state| {
        let _ = signal.try_set(state.clone());
    });
    on_cleanup(move || subscription.unsubscribe());
    provide_context(auth);
    provide_context(signal);
    signal
}

/// Navigate to `redirect_to` (default [`SIGN_IN_PATH`]) each time auth moves
/// into the loaded-without-user state.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, redirect_to: Option<&str>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    let guard = RefCell::new(AuthGuard::new(redirect_to));
    Effect::new(move || {
        let state = auth.get();
        let target = guard.borrow_mut().observe(&state).map(str::to_owned);
        if let Some(target) = target {
            navigate(&target, NavigateOptions::default());
        }
    });
}

/// Current user and loading flag for a guarded page.
#[derive(Clone, Copy)]
pub struct RequireAuth {
    pub user: Signal<Option<User>>,
    pub loading: Signal<bool>,
}

/// Require a signed-in user on the calling page, redirecting otherwise.
pub fn use_require_auth(redirect_to: Option<&str>) -> RequireAuth {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = leptos_router::hooks::use_navigate();
    install_unauth_redirect(auth, redirect_to, move |path, options| navigate(path, options));

    RequireAuth {
        user: Signal::derive(move || auth.with(|state| state.user().cloned())),
        loading: Signal::derive(move || auth.with(AuthState::is_loading)),
    }
}
