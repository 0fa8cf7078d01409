//! Scoring Engine
//!
//! Input: raw text. Output: AnalysisResult.
//! Pure apart from the injected perturbation source and the clock.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use super::catalog::IndicatorCatalog;
use super::perturbation::{Perturbation, UniformPerturbation};
use super::rules::{
    CONFIDENCE_CAP, CONFIDENCE_MAX, CONFIDENCE_MIN, LEGITIMATE_RECOMMENDATIONS,
    PERTURBATION_MAGNITUDE, SCAM_RECOMMENDATIONS, SCAM_THRESHOLD, SCORE_MULTIPLIER,
};
use super::types::{AnalysisResult, IndicatorMatch, RiskLevel};

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("empty content")]
    EmptyContent,

    #[error("internal scoring error: {0}")]
    Internal(String),
}

/// Intermediate numbers, exposed for logging and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub total_score: u32,
    pub base_confidence: f64,
    pub perturbation: f64,
    pub final_confidence: f64,
}

pub struct ScoringEngine {
    catalog: IndicatorCatalog,
    perturbation: Arc<dyn Perturbation>,
}

impl ScoringEngine {
    /// Engine with uniform noise
    pub fn new(catalog: IndicatorCatalog) -> Self {
        Self::with_perturbation(catalog, Arc::new(UniformPerturbation))
    }

    pub fn with_perturbation(catalog: IndicatorCatalog, perturbation: Arc<dyn Perturbation>) -> Self {
        Self { catalog, perturbation }
    }

    pub fn catalog(&self) -> &IndicatorCatalog {
        &self.catalog
    }

    /// Score a block of text
    pub fn analyze(&self, content: &str) -> Result<AnalysisResult, ScoringError> {
        if content.trim().is_empty() {
            return Err(ScoringError::EmptyContent);
        }
        if self.catalog.is_empty() {
            return Err(ScoringError::Internal("indicator catalog is empty".to_string()));
        }

        let indicators: Vec<IndicatorMatch> = self
            .catalog
            .iter()
            .map(|indicator| IndicatorMatch {
                indicator_type: indicator.definition.indicator_type.clone(),
                description: indicator.definition.description.clone(),
                severity: indicator.definition.severity,
                found: indicator.matches(content),
            })
            .collect();

        let total_score: u32 = self
            .catalog
            .iter()
            .zip(&indicators)
            .filter(|(_, m)| m.found)
            .map(|(indicator, _)| indicator.definition.weight)
            .sum();

        let breakdown = self.breakdown(total_score)?;

        // Classification uses the pre-perturbation value, risk tier the final one
        let is_scam = breakdown.base_confidence > SCAM_THRESHOLD;
        let risk_level = RiskLevel::from_confidence(breakdown.final_confidence);
        let confidence = round_one_decimal(breakdown.final_confidence);

        let matched = indicators.iter().filter(|m| m.found).count();
        tracing::debug!(
            "Scored content: {} of {} indicators, score {}, base {:.1}, offset {:+.2}, confidence {:.1}",
            matched,
            indicators.len(),
            breakdown.total_score,
            breakdown.base_confidence,
            breakdown.perturbation,
            confidence
        );

        Ok(AnalysisResult {
            is_scam,
            confidence,
            risk_level,
            summary: build_summary(is_scam, confidence, matched),
            recommendations: recommendations_for(is_scam),
            indicators,
            analysis_timestamp: Utc::now(),
        })
    }

    /// Confidence arithmetic for a given raw weight sum
    pub fn breakdown(&self, total_score: u32) -> Result<ScoreBreakdown, ScoringError> {
        let base_confidence = (total_score as f64 * SCORE_MULTIPLIER).min(CONFIDENCE_CAP);

        let perturbation = self.perturbation.sample(PERTURBATION_MAGNITUDE);
        if !perturbation.is_finite() {
            return Err(ScoringError::Internal(format!(
                "perturbation source returned {}",
                perturbation
            )));
        }

        let final_confidence = (base_confidence + perturbation).clamp(CONFIDENCE_MIN, CONFIDENCE_MAX);

        Ok(ScoreBreakdown {
            total_score,
            base_confidence,
            perturbation,
            final_confidence,
        })
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn build_summary(is_scam: bool, confidence: f64, matched: usize) -> String {
    if is_scam {
        format!(
            "This message has been classified as a likely scam with {:.1}% confidence. \
             It matched {} phishing indicator{} commonly associated with scams.",
            confidence,
            matched,
            if matched == 1 { "" } else { "s" }
        )
    } else {
        format!(
            "This message appears to be legitimate with {:.1}% legitimacy confidence. \
             However, always exercise caution with unsolicited messages.",
            round_one_decimal(CONFIDENCE_MAX - confidence)
        )
    }
}

fn recommendations_for(is_scam: bool) -> Vec<String> {
    let list: &[&str] = if is_scam {
        &SCAM_RECOMMENDATIONS
    } else {
        &LEGITIMATE_RECOMMENDATIONS
    };
    list.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// TESTS
// ============================================================================
