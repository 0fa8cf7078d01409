//! GuardSphere Scoring Server
//!
//! Scores free text for scam/phishing risk and keeps in-memory analytics
//! for the admin dashboard.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    GUARDSPHERE SERVER                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────┐  ┌──────────────────────┐ │
//! │  │  API      │  │  Scoring     │  │  Prediction Proxy    │ │
//! │  │  (Axum)   │─▶│  Engine      │  │  (external, 0-1)     │ │
//! │  └─────┬─────┘  └──────────────┘  └──────────────────────┘ │
//! │        ▼                                                    │
//! │  ┌──────────────────────────┐                               │
//! │  │ Analytics Store (memory) │                               │
//! │  └──────────────────────────┘                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod scoring;
mod analytics;
mod prediction;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

use analytics::AnalyticsStore;
use prediction::PredictionClient;
use scoring::{IndicatorCatalog, ScoringEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    init_tracing(&config);

    tracing::info!("GuardSphere server starting...");

    let catalog = IndicatorCatalog::load(config.indicator_catalog_path.as_deref())
        .context("Failed to load indicator catalog")?;
    tracing::info!("Loaded {} indicators (max score {})", catalog.len(), catalog.max_score());

    let predictor = match &config.prediction_service_url {
        Some(url) => {
            tracing::info!("Prediction service: {}", url);
            Some(
                PredictionClient::new(url.clone(), Duration::from_secs(config.prediction_timeout_secs))
                    .context("Failed to build prediction client")?,
            )
        }
        None => {
            tracing::info!("Prediction service not configured");
            None
        }
    };

    let state = AppState {
        engine: Arc::new(ScoringEngine::new(catalog)),
        analytics: Arc::new(AnalyticsStore::new(config.analysis_capacity, config.metrics_capacity)),
        predictor,
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .context("Server error")?;

    Ok(())
}

fn init_tracing(config: &config::Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "guardsphere_server=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub engine: Arc<ScoringEngine>,
    pub analytics: Arc<AnalyticsStore>,
    pub predictor: Option<PredictionClient>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/analyze", post(handlers::analyze::analyze))
        .route("/api/indicators", get(handlers::indicators::list))
        .route("/api/predict", post(handlers::predict::predict));

    // Admin auth is handled upstream
    let admin_routes = Router::new()
        .route("/api/admin/stats", get(handlers::stats::admin_stats))
        .route("/api/admin/analytics", delete(handlers::stats::clear_analytics))
        .route("/api/analyses", get(handlers::analyses::list))
        .route("/api/analyses/range", get(handlers::analyses::range))
        .route("/api/analyses/:id", get(handlers::analyses::get));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
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

// ============================================================================
// TESTS
// ============================================================================
