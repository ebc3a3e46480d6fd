//! # client
//!
//! Leptos + WASM frontend for the name generator site: the auth context and
//! guard, the access-denied view, and the client for the hosted name
//! generation function.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// Browser entrypoint: wire config and auth, finish a pending OAuth redirect, resolve the initial session and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use leptos::prelude::*;

    use crate::app::App;
    use crate::config::ClientConfig;
    use crate::net::supabase_auth::SupabaseAuth;
    use crate::state::auth_context::AuthContext;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = ClientConfig::from_build_env();
    let store = SupabaseAuth::new(config);
    let auth = AuthContext::new(store.clone());

    let location = web_sys::window().map(|w| w.location());
    let fragment = location
        .as_ref()
        .and_then(|l| l.hash().ok())
        .unwrap_or_default();

    let init_auth = auth.clone();
    leptos::task::spawn_local(async move {
        if fragment.contains("access_token=") || fragment.contains("error=") {
            if let Err(e) = store.complete_oauth_redirect(&fragment).await {
                log::warn!("oauth redirect failed: {e}");
            }
            if let Some(location) = location {
                let _ = location.set_hash("");
            }
        }
        init_auth.initialize().await;
    });

    leptos::mount::mount_to_body(move || view! { <App auth=auth/> });
}
