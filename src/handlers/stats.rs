//! Admin dashboard handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::analytics::{AnalysisRecord, DashboardStats, IndicatorCount, TrendBucket};
use crate::{AppError, AppResult, AppState};

/// Upper bound on the trend window
pub const MAX_TREND_DAYS: u32 = 365;

#[derive(Debug, Deserialize, Default)]
pub struct StatsQuery {
    pub days: Option<u32>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatsResponse {
    pub stats: DashboardStats,
    pub trend_data: Vec<TrendBucket>,
    pub top_indicators: Vec<IndicatorCount>,
    pub recent_analyses: Vec<AnalysisRecord>,
}

/// Aggregated dashboard data. Never fails; a malformed query falls back to defaults.
pub async fn admin_stats(
    State(state): State<AppState>,
    query: Option<Query<StatsQuery>>,
) -> Json<AdminStatsResponse> {
    let query = query.map(|Query(q)| q).unwrap_or_default();

    let days = query
        .days
        .unwrap_or(state.config.trend_days)
        .clamp(1, MAX_TREND_DAYS);
    let limit = query.limit.unwrap_or(state.config.recent_analyses_limit);

    Json(AdminStatsResponse {
        stats: state.analytics.dashboard_stats(),
        trend_data: state.analytics.trend_data(days),
        top_indicators: state.analytics.top_threat_indicators(),
        recent_analyses: state.analytics.get_analyses(Some(limit)),
    })
}

/// Reset analytics. Disabled in production.
pub async fn clear_analytics(State(state): State<AppState>) -> AppResult<Json<Value>> {
    if state.config.is_production() {
        return Err(AppError::NotFound("Not found".to_string()));
    }

    state.analytics.clear();
    Ok(Json(json!({ "cleared": true })))
}
