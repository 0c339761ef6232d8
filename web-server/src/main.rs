//! URL Sentry Web Server
//!
//! Form pages and a JSON API for malicious URL detection.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      URL SENTRY WEB                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │  Pages    │  │  JSON     │  │  Batch Scoring          │ │
//! │  │  (HTML)   │  │  API      │  │  (spawn_blocking)       │ │
//! │  └─────┬─────┘  └─────┬─────┘  └────────────┬────────────┘ │
//! │        └──────────────┼──────────────────────┘              │
//! │                       ▼                                     │
//! │              ┌─────────────────┐                            │
//! │              │ InferenceEngine │                            │
//! │              └─────────────────┘                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod views;
mod error;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use urlsentry_core::{load_classifier, InferenceEngine, ThresholdConfig};

use config::{Config, LogFormat};
pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    init_tracing(&config);

    tracing::info!("URL Sentry starting ({})...", config.environment);
    tracing::info!("Model: {}", config.model_path.display());

    // Load the classifier once; everything after this shares it
    let classifier = load_classifier(&config.model_path)
        .with_context(|| format!("Failed to load model from {}", config.model_path.display()))?;

    let engine = InferenceEngine::new(classifier)
        .with_threshold(ThresholdConfig::new(config.malicious_threshold));
    tracing::info!("Engine ready: {:?}", engine);

    // Build application state
    let addr = SocketAddr::new(config.host, config.port);
    let state = AppState {
        engine: Arc::new(engine),
        config: Arc::new(config),
    };

    // Build router
    let app = create_router(state);

    // Start server
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &Config) {
    let default_filter = if config.is_production() {
        "urlsentry_web=info,urlsentry_core=warn,tower_http=info"
    } else {
        "urlsentry_web=debug,urlsentry_core=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let json = config.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<InferenceEngine>,
    pub config: Arc<Config>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    // HTML pages
    let page_routes = Router::new()
        .route("/", get(handlers::pages::index))
        .route("/predict", post(handlers::pages::predict))
        .route("/batch", post(handlers::pages::batch));

    // JSON API
    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/model", get(handlers::api::model_info))
        .route("/api/v1/predict", post(handlers::api::predict))
        .route("/api/v1/batch", post(handlers::api::batch))
        .route("/api/v1/batch/export", post(handlers::api::export));

    // Combine all routes
    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
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
