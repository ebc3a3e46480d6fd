//! Route wrapper that applies the unauthenticated redirect to guarded pages.
//!
//! DESIGN
//! ======
//! Every mounted page goes through `AuthGate`; `AppRoute::requires_auth`
//! alone decides whether the redirect is installed. Unguarded routes render
//! their page directly.

use leptos::prelude::*;

use crate::routes::AppRoute;
use crate::util::auth::use_require_auth;

#[component]
pub fn AuthGate(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    if !route.requires_auth() {
        return children().into_any();
    }

    let guard = use_require_auth(Some(&route.sign_in_redirect()));
    view! {
        <Show
            when=move || !guard.loading.get() && guard.user.get().is_some()
            fallback=move || {
                view! {
                    <div class="auth-gate">
                        <p>{move || if guard.loading.get() { "Loading..." } else { "Redirecting to sign in..." }}</p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
    .into_any()
}
