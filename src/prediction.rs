//! External prediction service client
//!
//! The remote model reports confidence on a 0-1 scale. The internal scoring
//! engine uses 0-100. The two are never mixed: conversion happens only
//! through `PredictionResponse::confidence_percent`.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("prediction request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("prediction service returned status {0}")]
    Status(u16),

    #[error("invalid prediction response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    message: &'a str,
}

/// Response contract of the prediction service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: String,
    /// 0-1
    pub confidence: f64,
    pub is_scam: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_probabilities: Option<HashMap<String, f64>>,
}

impl PredictionResponse {
    /// Confidence converted to the 0-100 scale
    pub fn confidence_percent(&self) -> f64 {
        if !self.confidence.is_finite() {
            return 0.0;
        }
        (self.confidence.clamp(0.0, 1.0) * 1000.0).round() / 10.0
    }
}

#[derive(Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    url: String,
}

impl PredictionClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PredictionError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PredictionError::Request)?;

        Ok(Self { http, url: url.into() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn predict(&self, message: &str) -> Result<PredictionResponse, PredictionError> {
        let response = self
            .http
            .post(&self.url)
            .json(&PredictionRequest { message })
            .send()
            .await
            .map_err(PredictionError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictionError::Status(status.as_u16()));
        }

        response
            .json::<PredictionResponse>()
            .await
            .map_err(PredictionError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(confidence: f64) -> PredictionResponse {
        PredictionResponse {
            prediction: "phishing".to_string(),
            confidence,
            is_scam: true,
            all_probabilities: None,
        }
    }

    #[test]
    fn test_confidence_percent_conversion() {
        assert_eq!(response(0.0).confidence_percent(), 0.0);
        assert_eq!(response(0.873).confidence_percent(), 87.3);
        assert_eq!(response(1.0).confidence_percent(), 100.0);
        assert_eq!(response(1.7).confidence_percent(), 100.0);
        assert_eq!(response(-0.2).confidence_percent(), 0.0);
        assert_eq!(response(f64::NAN).confidence_percent(), 0.0);
    }

    #[test]
    fn test_response_contract() {
        let json = r#"{"prediction":"legitimate","confidence":0.91,"is_scam":false,
            "all_probabilities":{"legitimate":0.91,"phishing":0.09}}"#;
        let parsed: PredictionResponse = serde_json::from_str(json).unwrap();
        assert!(!parsed.is_scam);
        assert_eq!(parsed.all_probabilities.unwrap().len(), 2);

        let minimal: PredictionResponse =
            serde_json::from_str(r#"{"prediction":"spam","confidence":0.5,"is_scam":true}"#).unwrap();
        assert!(minimal.all_probabilities.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_request_error() {
        let client = PredictionClient::new("http://127.0.0.1:9/predict", Duration::from_secs(2)).unwrap();
        let err = client.predict("hello").await.unwrap_err();
        assert!(matches!(err, PredictionError::Request(_)));
    }
}
