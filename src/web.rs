use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::config::FlightWeatherConfig;
use crate::source::RecordSource;

const MAX_REQUEST_BYTES: usize = 16 * 1024;

/// Full application router
pub fn app(source: Arc<dyn RecordSource>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router())
        .merge(api::pages())
        .with_state(AppState::new(source))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run(config: &FlightWeatherConfig, source: Arc<dyn RecordSource>) -> Result<()> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(
        upstream = %config.upstream.base_url,
        "Web server running at http://{}",
        addr
    );

    axum::serve(listener, app(source))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutting down");
}
