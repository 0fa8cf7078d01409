//! Stored analysis handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::analytics::AnalysisRecord;
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// List analyses, newest first
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<AnalysisRecord>> {
    Json(state.analytics.get_analyses(query.limit))
}

/// Analyses within an inclusive time range
pub async fn range(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<AnalysisRecord>>> {
    if query.start > query.end {
        return Err(AppError::ValidationError("start must not be after end".to_string()));
    }

    Ok(Json(state.analytics.get_analyses_by_date_range(query.start, query.end)))
}

/// Get single analysis
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AnalysisRecord>> {
    let record = state
        .analytics
        .get_analysis(&id)
        .ok_or_else(|| AppError::NotFound("Analysis not found".to_string()))?;

    Ok(Json(record))
}
