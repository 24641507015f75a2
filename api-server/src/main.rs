//! LogLite Server
//!
//! HTTP front for kernel log anomaly analysis.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      LOGLITE SERVER                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────────┐  ┌─────────────────────┐  │
//! │  │  API      │  │  Payload      │  │  Analysis           │  │
//! │  │  (Axum)   │─▶│  (multipart / │─▶│  (spawn_blocking)   │  │
//! │  │           │  │   form)       │  │                     │  │
//! │  └───────────┘  └───────────────┘  └──────────┬──────────┘  │
//! │                                               ▼             │
//! │                                    ┌─────────────────────┐  │
//! │                                    │  loglite-core       │  │
//! │                                    │  (ONNX + keywords)  │  │
//! │                                    └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;


use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loglite_core::{AnalyzerConfig, LogAnalyzer};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();

    // Initialize logging (also captures `log` records from the core)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "loglite_server=debug,loglite_core=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();
    let analyzer_config = AnalyzerConfig::from_env();

    tracing::info!("LogLite server starting...");
    tracing::info!(
        "Model search path: {} then {}",
        analyzer_config.model_dir.display(),
        analyzer_config.fallback_model_dir.display()
    );

    // Model load is blocking and fatal on failure
    let analyzer = tokio::task::spawn_blocking(move || LogAnalyzer::from_config(&analyzer_config))
        .await
        .context("Model loading task panicked")?
        .context("Failed to load the log classifier")?;

    // Build application state
    let state = AppState {
        analyzer: Arc::new(analyzer),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<LogAnalyzer>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/analyze", post(handlers::analyze::analyze))
        .route("/api/logs/analyze", post(handlers::analyze::analyze))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
