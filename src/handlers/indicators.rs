//! Indicator catalog handler

use axum::{extract::State, Json};

use crate::scoring::IndicatorDefinition;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Json<Vec<IndicatorDefinition>> {
    Json(state.engine.catalog().definitions())
}
