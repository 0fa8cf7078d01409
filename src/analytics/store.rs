//! Analytics Store
//!
//! Process-lifetime, in-memory ring buffers of analysis records and metrics
//! samples, plus the statistics derived from them. One instance is built at
//! startup and shared through `AppState`.
//!
//! Read paths never fail: any aggregation error is logged and replaced by
//! an empty/zero default.

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::{DateTime, Days, Duration, Local, NaiveDate, Utc};
use parking_lot::RwLock;
use rand::Rng;
use thiserror::Error;

use super::types::{
    AnalysisLabel, AnalysisRecord, DashboardStats, IndicatorCount, NewAnalysis, NewSystemMetrics,
    SystemMetricsSample, TrendBucket, DEFAULT_RESPONSE_TIME, SIMULATED_UPTIME,
};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default maximum number of analysis records
pub const DEFAULT_ANALYSIS_CAPACITY: usize = 10_000;

/// Default maximum number of metrics samples
pub const DEFAULT_METRICS_CAPACITY: usize = 1_000;

/// Metrics samples averaged for the response time stat
const RESPONSE_TIME_WINDOW: usize = 10;

/// Window for the distinct-IP active user count
const ACTIVE_USER_WINDOW_HOURS: i64 = 24;

/// Maximum entries returned by `top_threat_indicators`
const TOP_INDICATOR_LIMIT: usize = 10;

const ID_SUFFIX_LEN: usize = 9;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("date range out of bounds: {0}")]
    RangeOverflow(String),
}

// ============================================================================
// STORE
// ============================================================================

#[derive(Default)]
struct StoreInner {
    analyses: VecDeque<AnalysisRecord>,
    analysis_ids: HashSet<String>,
    metrics: VecDeque<SystemMetricsSample>,
}

pub struct AnalyticsStore {
    inner: RwLock<StoreInner>,
    analysis_capacity: usize,
    metrics_capacity: usize,
}

impl Default for AnalyticsStore {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYSIS_CAPACITY, DEFAULT_METRICS_CAPACITY)
    }
}

impl AnalyticsStore {
    pub fn new(analysis_capacity: usize, metrics_capacity: usize) -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            analysis_capacity: analysis_capacity.max(1),
            metrics_capacity: metrics_capacity.max(1),
        }
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    /// Append a record, evicting the oldest beyond capacity
    pub fn add_analysis(&self, analysis: NewAnalysis) -> AnalysisRecord {
        self.insert_analysis(analysis, Utc::now())
    }

    fn insert_analysis(&self, analysis: NewAnalysis, timestamp: DateTime<Utc>) -> AnalysisRecord {
        let mut inner = self.inner.write();

        let mut id = generate_id(timestamp);
        while inner.analysis_ids.contains(&id) {
            id = generate_id(timestamp);
        }

        let record = AnalysisRecord {
            id: id.clone(),
            timestamp,
            result: analysis.result,
            confidence: analysis.confidence,
            risk_level: analysis.risk_level,
            indicators: analysis.indicators,
            message_type: analysis.message_type,
            user_agent: analysis.user_agent,
            ip_address: analysis.ip_address,
        };

        inner.analysis_ids.insert(id);
        inner.analyses.push_back(record.clone());

        while inner.analyses.len() > self.analysis_capacity {
            if let Some(evicted) = inner.analyses.pop_front() {
                inner.analysis_ids.remove(&evicted.id);
            }
        }

        record
    }

    /// Append a metrics sample, evicting the oldest beyond capacity
    pub fn add_system_metrics(&self, metrics: NewSystemMetrics) -> SystemMetricsSample {
        let sample = SystemMetricsSample {
            timestamp: Utc::now(),
            cpu_usage: metrics.cpu_usage,
            memory_usage: metrics.memory_usage,
            response_time: metrics.response_time,
            active_connections: metrics.active_connections,
        };

        let mut inner = self.inner.write();
        inner.metrics.push_back(sample);
        while inner.metrics.len() > self.metrics_capacity {
            inner.metrics.pop_front();
        }

        sample
    }

    /// Drop everything
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.analyses.clear();
        inner.analysis_ids.clear();
        inner.metrics.clear();
        tracing::info!("Analytics store cleared");
    }

    // ------------------------------------------------------------------------
    // Record queries
    // ------------------------------------------------------------------------

    pub fn analysis_count(&self) -> usize {
        self.inner.read().analyses.len()
    }

    pub fn metrics_count(&self) -> usize {
        self.inner.read().metrics.len()
    }

    /// Records newest first, optionally truncated
    pub fn get_analyses(&self, limit: Option<usize>) -> Vec<AnalysisRecord> {
        let inner = self.inner.read();
        // Reverse first so equal timestamps keep newest-inserted first after the stable sort
        let mut sorted: Vec<AnalysisRecord> = inner.analyses.iter().rev().cloned().collect();
        drop(inner);

        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        if let Some(limit) = limit {
            sorted.truncate(limit);
        }
        sorted
    }

    /// Records with `start <= timestamp <= end`, in insertion order
    pub fn get_analyses_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<AnalysisRecord> {
        self.inner
            .read()
            .analyses
            .iter()
            .filter(|a| a.timestamp >= start && a.timestamp <= end)
            .cloned()
            .collect()
    }

    pub fn get_analysis(&self, id: &str) -> Option<AnalysisRecord> {
        let inner = self.inner.read();
        if !inner.analysis_ids.contains(id) {
            return None;
        }
        inner.analyses.iter().find(|a| a.id == id).cloned()
    }

    // ------------------------------------------------------------------------
    // Statistics
    // ------------------------------------------------------------------------

    pub fn dashboard_stats(&self) -> DashboardStats {
        self.dashboard_stats_at(Local::now())
    }

    pub fn dashboard_stats_at(&self, now: DateTime<Local>) -> DashboardStats {
        self.try_dashboard_stats(now).unwrap_or_else(|e| {
            tracing::warn!("Error calculating dashboard stats: {}", e);
            DashboardStats::default()
        })
    }

    fn try_dashboard_stats(&self, now: DateTime<Local>) -> Result<DashboardStats, AggregationError> {
        let today = now.date_naive();
        let active_since = now
            .with_timezone(&Utc)
            .checked_sub_signed(Duration::hours(ACTIVE_USER_WINDOW_HOURS))
            .ok_or_else(|| AggregationError::RangeOverflow(format!("{} - 24h", now)))?;

        let inner = self.inner.read();

        let mut phishing_detected = 0;
        let mut legitimate_emails = 0;
        let mut daily_analyses = 0;
        let mut confidence_sum = 0.0;
        let mut confidence_count = 0usize;
        let mut active_ips: HashSet<&str> = HashSet::new();

        for analysis in &inner.analyses {
            match analysis.result {
                AnalysisLabel::Phishing => phishing_detected += 1,
                AnalysisLabel::Legitimate => legitimate_emails += 1,
                AnalysisLabel::Suspicious => {}
            }

            if analysis.timestamp.with_timezone(&Local).date_naive() >= today {
                daily_analyses += 1;
            }

            if analysis.confidence.is_finite() && analysis.confidence > 0.0 {
                confidence_sum += analysis.confidence;
                confidence_count += 1;
            }

            if analysis.timestamp >= active_since && !analysis.ip_address.trim().is_empty() {
                active_ips.insert(analysis.ip_address.as_str());
            }
        }

        let average_confidence = if confidence_count > 0 {
            confidence_sum / confidence_count as f64
        } else {
            0.0
        };

        let recent: Vec<f64> = inner
            .metrics
            .iter()
            .rev()
            .take(RESPONSE_TIME_WINDOW)
            .map(|m| if m.response_time.is_finite() { m.response_time } else { 0.0 })
            .collect();
        let response_time = if recent.is_empty() {
            DEFAULT_RESPONSE_TIME
        } else {
            recent.iter().sum::<f64>() / recent.len() as f64
        };

        Ok(DashboardStats {
            total_analyses: inner.analyses.len(),
            phishing_detected,
            legitimate_emails,
            average_confidence: round_one_decimal(average_confidence),
            system_uptime: SIMULATED_UPTIME,
            response_time: round_one_decimal(response_time),
            active_users: active_ips.len(),
            daily_analyses,
        })
    }

    /// Per-day counts for the trailing `days` local calendar days, oldest first
    pub fn trend_data(&self, days: u32) -> Vec<TrendBucket> {
        self.trend_data_at(days, Local::now())
    }

    pub fn trend_data_at(&self, days: u32, now: DateTime<Local>) -> Vec<TrendBucket> {
        self.try_trend_data(days, now).unwrap_or_else(|e| {
            tracing::warn!("Error generating trend data: {}", e);
            Vec::new()
        })
    }

    fn try_trend_data(&self, days: u32, now: DateTime<Local>) -> Result<Vec<TrendBucket>, AggregationError> {
        let today = now.date_naive();

        let hint = days.min(366) as usize;
        let mut buckets = Vec::with_capacity(hint);
        let mut index: HashMap<NaiveDate, usize> = HashMap::with_capacity(hint);

        for offset in (0..days).rev() {
            let date = today
                .checked_sub_days(Days::new(offset as u64))
                .ok_or_else(|| AggregationError::RangeOverflow(format!("{} - {} days", today, offset)))?;
            index.insert(date, buckets.len());
            buckets.push(TrendBucket {
                date,
                phishing: 0,
                legitimate: 0,
                suspicious: 0,
                total: 0,
            });
        }

        let inner = self.inner.read();
        for analysis in &inner.analyses {
            let date = analysis.timestamp.with_timezone(&Local).date_naive();
            let Some(&i) = index.get(&date) else {
                continue;
            };
            let bucket = &mut buckets[i];
            match analysis.result {
                AnalysisLabel::Phishing => bucket.phishing += 1,
                AnalysisLabel::Legitimate => bucket.legitimate += 1,
                AnalysisLabel::Suspicious => bucket.suspicious += 1,
            }
            bucket.total += 1;
        }

        Ok(buckets)
    }

    /// Most frequent matched indicators, at most 10, descending by count
    pub fn top_threat_indicators(&self) -> Vec<IndicatorCount> {
        let inner = self.inner.read();

        let mut counts: Vec<IndicatorCount> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for name in inner.analyses.iter().flat_map(|a| a.indicators.iter()) {
            if name.trim().is_empty() {
                continue;
            }
            match positions.get(name.as_str()) {
                Some(&i) => counts[i].count += 1,
                None => {
                    positions.insert(name.as_str(), counts.len());
                    counts.push(IndicatorCount {
                        name: name.clone(),
                        count: 1,
                    });
                }
            }
        }

        // Stable: ties keep first-seen order
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(TOP_INDICATOR_LIMIT);
        counts
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn generate_id(timestamp: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("ANL-{}-{}", timestamp.timestamp_millis(), suffix)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ============================================================================
// TESTS
// ============================================================================
