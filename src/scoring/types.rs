//! Scoring Types
//!
//! Data structures for content risk scoring. No scoring logic here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::rules::{HIGH_RISK_MIN, MEDIUM_RISK_MIN};

// ============================================================================
// SEVERITY
// ============================================================================

/// Severity attached to an indicator definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Coarse three-tier bucketing of confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Bucket a 0-100 confidence value
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= HIGH_RISK_MIN {
            RiskLevel::High
        } else if confidence >= MEDIUM_RISK_MIN {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// Outcome of one indicator for one input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorMatch {
    #[serde(rename = "type")]
    pub indicator_type: String,
    pub description: String,
    pub severity: Severity,
    pub found: bool,
}

/// Result of scoring one block of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(alias = "isPhishing")]
    pub is_scam: bool,
    /// 0-100, one decimal place.
    ///
    /// `risk_level` is bucketed before rounding, so a value just under a
    /// tier boundary can round up to it (39.96 reports 40.0 with low risk).
    pub confidence: f64,
    pub risk_level: RiskLevel,
    /// Catalog order
    pub indicators: Vec<IndicatorMatch>,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub analysis_timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    /// Names of the indicators that fired
    pub fn matched_indicator_names(&self) -> Vec<String> {
        self.indicators
            .iter()
            .filter(|i| i.found)
            .map(|i| i.indicator_type.clone())
            .collect()
    }
}
