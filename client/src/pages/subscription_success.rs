//! Post-checkout confirmation page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only guarded route. `AuthGate` sends visitors without a session to
//! sign-in before anything here renders.

#[cfg(test)]
#[path = "subscription_success_test.rs"]
mod subscription_success_test;

use leptos::prelude::*;

use crate::net::types::User;
use crate::routes::AppRoute;
use crate::state::auth::AuthState;
use crate::state::auth_context::AuthContext;

/// Name to greet `user` by: metadata `full_name`, then `name`, then email.
pub(crate) fn display_name(user: &User) -> String {
    ["full_name", "name"]
        .iter()
        .find_map(|key| {
            user.user_metadata
                .get(*key)
                .and_then(serde_json::Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .map(str::to_owned)
        .or_else(|| user.email.clone())
        .unwrap_or_else(|| "there".to_owned())
}

#[component]
pub fn SubscriptionSuccessPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_sign_out = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        let auth = auth.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = auth.sign_out().await {
                info.set(format!("Sign out failed: {e}"));
            }
            busy.set(false);
        });
    };

    view! {
        <div class="subscription-page">
            <div class="subscription-card">
                <h1>"Subscription confirmed"</h1>
                <p>
                    {move || {
                        auth_state
                            .with(|state| state.user().map(display_name))
                            .map(|name| format!("Thanks for subscribing, {name}!"))
                            .unwrap_or_default()
                    }}
                </p>
                <a class="subscription-card__cta" href=AppRoute::Generators.path()>
                    "Start generating names"
                </a>
                <button class="subscription-card__sign-out" on:click=on_sign_out disabled=move || busy.get()>
                    "Sign out"
                </button>
                <Show when=move || !info.get().is_empty()>
                    <p class="subscription-card__message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
