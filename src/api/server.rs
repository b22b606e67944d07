use std::net::SocketAddr;

use axum::{Router, extract::DefaultBodyLimit, routing::get, routing::post};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{
    services::{download, health, index, serve_download},
    state::AppState,
};
use crate::config::Config;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Build the HTTP router for the given state
pub fn router(state: AppState) -> Router {
    let max_form_bytes = state.config.server.max_form_bytes;

    Router::new()
        .route("/", get(index))
        .route("/download", post(download))
        .route("/downloads/{*path}", get(serve_download))
        .route("/health", get(health))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_form_bytes))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(address: Option<SocketAddr>) -> Result<(), AnyError> {
    info!("Loading configuration");
    let mut config = Config::load().map_err(|e| format!("Failed to load config: {}", e))?;

    if let Some(address) = address {
        config.server.bind_addr = address;
    }
    let address = config.server.bind_addr;

    let state = AppState::from_config(config);
    if !state.downloader.output().is_available() {
        tracing::warn!("Starting with downloads disabled");
    }

    let app = router(state);

    let listener = TcpListener::bind(address).await?;
    info!(%address, "clipfetch listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
