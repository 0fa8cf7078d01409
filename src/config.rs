//! Configuration module

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Log output format (text, json)
    pub log_format: String,

    /// Optional JSON file replacing the built-in indicator catalog
    pub indicator_catalog_path: Option<PathBuf>,

    /// Maximum analysis records kept in memory
    pub analysis_capacity: usize,

    /// Maximum system metrics samples kept in memory
    pub metrics_capacity: usize,

    /// Default trend window (days) on the stats endpoint
    pub trend_days: u32,

    /// Number of recent analyses returned by the stats endpoint
    pub recent_analyses_limit: usize,

    /// Full URL of the external prediction endpoint
    pub prediction_service_url: Option<String>,

    /// Timeout for prediction service calls, in seconds
    pub prediction_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: parse_var("PORT").unwrap_or(8080),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "text".to_string()),

            indicator_catalog_path: non_empty_var("INDICATOR_CATALOG_PATH").map(PathBuf::from),

            analysis_capacity: parse_var("ANALYSIS_CAPACITY").unwrap_or(10_000),

            metrics_capacity: parse_var("METRICS_CAPACITY").unwrap_or(1_000),

            trend_days: parse_var("TREND_DAYS").unwrap_or(30),

            recent_analyses_limit: parse_var("RECENT_ANALYSES_LIMIT").unwrap_or(50),

            prediction_service_url: non_empty_var("PREDICTION_SERVICE_URL"),

            prediction_timeout_secs: parse_var("PREDICTION_TIMEOUT_SECS").unwrap_or(30),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Check if logs should be emitted as JSON
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            environment: "development".to_string(),
            log_format: "text".to_string(),
            indicator_catalog_path: None,
            analysis_capacity: 10_000,
            metrics_capacity: 1_000,
            trend_days: 30,
            recent_analyses_limit: 50,
            prediction_service_url: None,
            prediction_timeout_secs: 30,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
