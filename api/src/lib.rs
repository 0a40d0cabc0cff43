use std::{env, error::Error, sync::Arc};

mod core;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;

use crate::core::app_state::AppState;
use crate::routes::{chat::chat_route::chat, health_route::health, reindex_route::reindex};

/// Builds shared state and serves the HTTP API until Ctrl+C.
pub async fn start() -> Result<(), Box<dyn Error>> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".into());

    let state = Arc::new(AppState::from_env().await?);

    let app = Router::new()
        .route("/chat", post(chat))
        .route("/reindex", post(reindex))
        .route("/health", get(health))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&host_url).await?;
    tracing::info!(address = %host_url, "API listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
