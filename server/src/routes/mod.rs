//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each hosted function is mounted at `/functions/v1/{name}`, the same path
//! the client's function gateway calls. Handlers are independent and keep no
//! state between requests.

pub mod functions;

use std::any::Any;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use contracts::{AUTO_CONFIRM_SIGNUP, GROQ_NAME_GENERATOR, function_path};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route(&function_path(AUTO_CONFIRM_SIGNUP), post(functions::auto_confirm_signup))
        .route(&function_path(GROQ_NAME_GENERATOR), post(functions::groq_name_generator))
        .route("/healthz", get(healthz))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A panicking handler still answers with the 400 `{ error }` shape.
fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| (*s).to_owned()))
        .unwrap_or_else(|| "unexpected error".to_owned());
    tracing::error!(error = %message, "function handler panicked");
    functions::bad_request(message)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
