//! Prediction service proxy

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::prediction::PredictionResponse;
use crate::{AppError, AppResult, AppState};

/// Label for the remote model's confidence scale
pub const UNIT_SCALE: &str = "unit";

#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[serde(default)]
    #[validate(length(max = 50000, message = "message is too long"))]
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictView {
    #[serde(flatten)]
    pub response: PredictionResponse,
    pub confidence_scale: &'static str,
    pub confidence_percent: f64,
}

pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> AppResult<Json<PredictView>> {
    req.validate()?;
    if req.message.trim().is_empty() {
        return Err(AppError::ValidationError("Message is required".to_string()));
    }

    let client = state
        .predictor
        .as_ref()
        .ok_or_else(|| AppError::ServiceUnavailable("Prediction service not configured".to_string()))?;

    let response = client.predict(&req.message).await?;
    tracing::debug!(
        "Prediction from {}: {} ({:.3})",
        client.url(),
        response.prediction,
        response.confidence
    );

    Ok(Json(PredictView {
        confidence_percent: response.confidence_percent(),
        confidence_scale: UNIT_SCALE,
        response,
    }))
}
