//! Terminal view for a signed-in user who may not see the requested page.
//!
//! Distinct from the unauthenticated case, which the auth guard handles with
//! a redirect. The only way forward is back to the home page.

use leptos::prelude::*;

pub const DEFAULT_MESSAGE: &str = "You don't have permission to view this page.";
pub const HOME_PATH: &str = "/";

#[component]
pub fn AccessDenied(#[prop(optional, into)] message: Option<String>) -> impl IntoView {
    let message = message.unwrap_or_else(|| DEFAULT_MESSAGE.to_owned());
    view! {
        <div class="access-denied">
            <div class="access-denied__card">
                <h1>"Access Denied"</h1>
                <p class="access-denied__message">{message}</p>
                <a class="access-denied__home" href=HOME_PATH>
                    "Return Home"
                </a>
            </div>
        </div>
    }
}
