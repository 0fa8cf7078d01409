//! Analytics Types
//!
//! Stored records and the derived views served to dashboards.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::RiskLevel;

// ============================================================================
// LABELS
// ============================================================================

/// Classification label used for aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisLabel {
    Phishing,
    Legitimate,
    /// Reserved for alternate classifiers, the scoring engine never emits it
    Suspicious,
}

impl AnalysisLabel {
    pub fn from_verdict(is_scam: bool) -> Self {
        if is_scam {
            AnalysisLabel::Phishing
        } else {
            AnalysisLabel::Legitimate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisLabel::Phishing => "phishing",
            AnalysisLabel::Legitimate => "legitimate",
            AnalysisLabel::Suspicious => "suspicious",
        }
    }
}

/// Channel the analyzed content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Email,
    Sms,
    #[default]
    General,
}

// ============================================================================
// RECORDS
// ============================================================================

/// Record fields supplied by the caller; id and timestamp are assigned on insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnalysis {
    pub result: AnalysisLabel,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub indicators: Vec<String>,
    pub message_type: MessageType,
    pub user_agent: String,
    pub ip_address: String,
}

/// Stored analysis outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub result: AnalysisLabel,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    /// Matched indicator type names
    pub indicators: Vec<String>,
    pub message_type: MessageType,
    pub user_agent: String,
    /// Last IPv4 octet masked
    pub ip_address: String,
}

/// Telemetry fields supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewSystemMetrics {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    /// Seconds
    pub response_time: f64,
    pub active_connections: u32,
}

/// Stored telemetry sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetricsSample {
    pub timestamp: DateTime<Utc>,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub response_time: f64,
    pub active_connections: u32,
}

// ============================================================================
// DERIVED VIEWS
// ============================================================================

/// Simulated service uptime percentage
pub const SIMULATED_UPTIME: f64 = 99.8;

/// Response time reported when no metrics have been recorded
pub const DEFAULT_RESPONSE_TIME: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_analyses: usize,
    pub phishing_detected: usize,
    pub legitimate_emails: usize,
    pub average_confidence: f64,
    pub system_uptime: f64,
    pub response_time: f64,
    pub active_users: usize,
    pub daily_analyses: usize,
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self {
            total_analyses: 0,
            phishing_detected: 0,
            legitimate_emails: 0,
            average_confidence: 0.0,
            system_uptime: SIMULATED_UPTIME,
            response_time: DEFAULT_RESPONSE_TIME,
            active_users: 0,
            daily_analyses: 0,
        }
    }
}

/// One local calendar day of analyses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendBucket {
    pub date: NaiveDate,
    pub phishing: usize,
    pub legitimate: usize,
    pub suspicious: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorCount {
    pub name: String,
    pub count: usize,
}
