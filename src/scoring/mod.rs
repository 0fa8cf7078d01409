//! Scoring Module
//!
//! Turns a block of free text into a risk classification by running a
//! catalog of weighted regex indicators over it.
//!
//! ## Structure
//! - `types`: Severity, RiskLevel, IndicatorMatch, AnalysisResult
//! - `rules`: Multipliers, caps, thresholds and recommendation text
//! - `catalog`: Indicator definitions and loading
//! - `perturbation`: Injectable confidence noise
//! - `engine`: Scoring logic
//!
//! ## Usage
//! ```ignore
//! let engine = ScoringEngine::new(IndicatorCatalog::builtin()?);
//! let result = engine.analyze("URGENT: verify your password")?;
//! if result.is_scam {
//!     println!("{} risk", result.risk_level);
//! }
//! ```

pub mod types;
pub mod rules;
pub mod catalog;
pub mod perturbation;
pub mod engine;

pub use types::{AnalysisResult, RiskLevel};
pub use catalog::{IndicatorCatalog, IndicatorDefinition};
pub use engine::{ScoringEngine, ScoringError};
