//! Sign-in page supporting email + password and Google OAuth.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded pages redirect here with `?next=<path>`. Once the auth signal
//! carries a user the page leaves for that path, so a completed sign-in, a
//! sign-up that is confirmed on the spot and an already signed-in visitor
//! all land in the same place.

#[cfg(test)]
#[path = "sign_in_test.rs"]
mod sign_in_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};
use serde_json::Map;

use crate::routes::AppRoute;
use crate::state::auth::AuthState;
use crate::state::auth_context::AuthContext;

/// Trimmed email and the password, or the message to show instead.
pub(crate) fn credentials(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Absolute URL the OAuth provider sends the browser back to.
fn oauth_return_url(next: AppRoute) -> Option<String> {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .map(|origin| format!("{origin}{}", next.path()))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = next;
        None
    }
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let query = use_query_map();
    let next = Memo::new(move |_| query.with(|q| AppRoute::after_sign_in(q.get("next").as_deref())));

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let navigate = use_navigate();
    Effect::new(move || {
        if auth_state.with(|state| state.user().is_some()) {
            navigate(next.get().path(), NavigateOptions::default());
        }
    });

    let submit_auth = auth.clone();
    let submit = move |signing_up: bool| {
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match credentials(&email.get(), &password.get()) {
            Ok(pair) => pair,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(if signing_up { "Creating account..." } else { "Signing in..." }.to_owned());

        let auth = submit_auth.clone();
        leptos::task::spawn_local(async move {
            let result = if signing_up {
                auth.sign_up(&email_value, &password_value, Map::new()).await
            } else {
                auth.sign_in(&email_value, &password_value).await
            };
            match result {
                Ok(()) if auth.state().user().is_none() => {
                    info.set("Check your email to confirm your account.".to_owned());
                }
                Ok(()) => info.set(String::new()),
                Err(e) => info.set(format!("{} failed: {e}", if signing_up { "Sign up" } else { "Sign in" })),
            }
            busy.set(false);
        });
    };
    let sign_up = submit.clone();

    let on_google = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        info.set("Redirecting to Google...".to_owned());
        let auth = auth.clone();
        let return_url = oauth_return_url(next.get_untracked());
        leptos::task::spawn_local(async move {
            match auth.sign_in_with_google(return_url.as_deref()).await {
                Ok(url) => {
                    #[cfg(feature = "csr")]
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(&url);
                    }
                    #[cfg(not(feature = "csr"))]
                    log::debug!("oauth authorize url {url}");
                }
                Err(e) => {
                    info.set(format!("Google sign-in failed: {e}"));
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <div class="sign-in-page">
            <div class="sign-in-card">
                <h1>"Sign in"</h1>
                <form
                    class="sign-in-form"
                    on:submit=move |ev: leptos::ev::SubmitEvent| {
                        ev.prevent_default();
                        submit(false);
                    }
                >
                    <input
                        class="sign-in-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="sign-in-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="sign-in-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                    <button
                        class="sign-in-button sign-in-button--secondary"
                        type="button"
                        disabled=move || busy.get()
                        on:click=move |_| sign_up(true)
                    >
                        "Create account"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="sign-in-message">{move || info.get()}</p>
                </Show>
                <div class="sign-in-divider"></div>
                <button class="sign-in-button" type="button" disabled=move || busy.get() on:click=on_google>
                    "Continue with Google"
                </button>
            </div>
        </div>
    }
}
