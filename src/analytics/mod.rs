//! Analytics Module
//!
//! In-memory record keeping for scoring outcomes and the dashboard views
//! derived from it.
//!
//! State lives for the process lifetime only and is not shared between
//! instances; a horizontally scaled deployment reports per-instance stats.

pub mod types;
pub mod record;
pub mod store;
pub mod telemetry;

pub use types::{
    AnalysisRecord, DashboardStats, IndicatorCount, MessageType, NewAnalysis, TrendBucket,
};
pub use store::AnalyticsStore;
