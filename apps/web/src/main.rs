mod analysis_client;
mod config;
mod errors;
mod models;
mod render;
mod routes;
mod state;
mod submission;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis_client::HttpAnalysisClient;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::submission::SubmissionController;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume screening web v{}", env!("CARGO_PKG_VERSION"));

    // Initialize analysis client
    let client = HttpAnalysisClient::new(config.analyze_url.clone(), config.analyze_timeout)?;
    info!(url = client.url(), "Analysis client initialized");

    let controller = Arc::new(SubmissionController::new(Arc::new(client)));

    let state = AppState {
        config: config.clone(),
        controller: controller.clone(),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(controller))
        .await?;

    Ok(())
}

/// Resolves on ctrl-c and cancels any in-flight analysis so shutdown is not
/// held up by the analysis service.
async fn shutdown_signal(controller: Arc<SubmissionController>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
    if controller.cancel() {
        info!("Cancelled in-flight analysis");
    }
}
