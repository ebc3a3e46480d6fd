mod config;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::identity::SupabaseAdmin;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid server configuration");

    // Name generation is optional: the function answers 400 until a key is configured.
    let llm = match llm::from_env() {
        Ok((client, model)) => {
            tracing::info!(%model, "name generator initialized");
            Some(client)
        }
        Err(e) => {
            tracing::warn!(code = e.error_code(), error = %e, "name generator not configured");
            None
        }
    };

    let identity = Arc::new(SupabaseAdmin::new(config.identity.clone()).expect("failed to build identity client"));
    let state = state::AppState::new(identity, llm);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "functions listening");
    axum::serve(listener, app).await.expect("server failed");
}
