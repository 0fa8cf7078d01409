//! Content analysis handler

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, State},
    http::{header::USER_AGENT, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::analytics::{telemetry, MessageType, NewAnalysis};
use crate::scoring::AnalysisResult;
use crate::{AppResult, AppState};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    #[validate(length(max = 50000, message = "content is too long"))]
    pub content: String,
    #[serde(default)]
    pub message_type: MessageType,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis_id: String,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Score content and record the outcome
pub async fn analyze(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(req): Json<AnalyzeRequest>,
) -> AppResult<Json<AnalyzeResponse>> {
    let started = Instant::now();
    req.validate()?;
    tracing::debug!("Analyze request: {} characters", req.content.chars().count());

    let result = state.engine.analyze(&req.content)?;

    let ip = client_ip(&headers, peer.map(|ConnectInfo(addr)| addr));
    let user_agent = headers.get(USER_AGENT).and_then(|v| v.to_str().ok());

    let record = state.analytics.add_analysis(NewAnalysis::from_result(
        &result,
        req.message_type,
        user_agent,
        ip.as_deref(),
    ));
    state
        .analytics
        .add_system_metrics(telemetry::simulated_sample(started.elapsed()));

    tracing::info!(
        "Analysis {} -> {} ({:.1}%, {} risk)",
        record.id,
        record.result.as_str(),
        result.confidence,
        result.risk_level
    );

    Ok(Json(AnalyzeResponse {
        analysis_id: record.id,
        result,
    }))
}

/// First X-Forwarded-For hop, then X-Real-IP, then the socket peer
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    header_value(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| header_value(headers, "x-real-ip"))
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const MAX_CONTENT_LENGTH: usize = 50_000;

    #[test]
    fn test_client_ip_precedence() {
        let peer: SocketAddr = "198.51.100.7:4000".parse().unwrap();
        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, Some(peer)).as_deref(), Some("198.51.100.7"));
        assert_eq!(client_ip(&headers, None), None);

        headers.insert("x-real-ip", HeaderValue::from_static("192.0.2.5"));
        assert_eq!(client_ip(&headers, Some(peer)).as_deref(), Some("192.0.2.5"));

        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.1, 10.0.0.1"));
        assert_eq!(client_ip(&headers, Some(peer)).as_deref(), Some("203.0.113.1"));
    }

    #[test]
    fn test_request_defaults() {
        let req: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(req.content.is_empty());
        assert_eq!(req.message_type, MessageType::General);

        let req: AnalyzeRequest =
            serde_json::from_str(r#"{"content":"hi","messageType":"sms"}"#).unwrap();
        assert_eq!(req.message_type, MessageType::Sms);
    }

    #[test]
    fn test_content_length_bound() {
        let at_limit = AnalyzeRequest {
            content: "a".repeat(MAX_CONTENT_LENGTH),
            message_type: MessageType::General,
        };
        assert!(at_limit.validate().is_ok());

        let over = AnalyzeRequest {
            content: "a".repeat(MAX_CONTENT_LENGTH + 1),
            message_type: MessageType::General,
        };
        assert!(over.validate().is_err());
    }
}
