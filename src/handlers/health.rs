//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    indicators: usize,
    analyses_stored: usize,
    metrics_stored: usize,
    prediction_service: bool,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        indicators: state.engine.catalog().len(),
        analyses_stored: state.analytics.analysis_count(),
        metrics_stored: state.analytics.metrics_count(),
        prediction_service: state.predictor.is_some(),
    })
}
