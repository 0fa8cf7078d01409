//! Scoring Rules & Thresholds
//!
//! Constants and fixed text used by the scoring engine. No scoring logic.

// ============================================================================
// CONFIDENCE
// ============================================================================

/// Raw weight sum is amplified by this factor
pub const SCORE_MULTIPLIER: f64 = 1.2;

/// Pre-perturbation confidence never exceeds this
pub const CONFIDENCE_CAP: f64 = 95.0;

/// Maximum perturbation, in percentage points, either direction
pub const PERTURBATION_MAGNITUDE: f64 = 5.0;

/// Absolute confidence bounds after perturbation
pub const CONFIDENCE_MIN: f64 = 0.0;
pub const CONFIDENCE_MAX: f64 = 100.0;

// ============================================================================
// CLASSIFICATION THRESHOLDS
// ============================================================================

/// Pre-perturbation confidence above this = scam
pub const SCAM_THRESHOLD: f64 = 50.0;

/// At or above this = high risk
pub const HIGH_RISK_MIN: f64 = 70.0;

/// At or above this = medium risk
pub const MEDIUM_RISK_MIN: f64 = 40.0;

// ============================================================================
// RECOMMENDATIONS
// ============================================================================

pub const SCAM_RECOMMENDATIONS: [&str; 5] = [
    "Do not respond to this message",
    "Do not click any links or download attachments",
    "Do not share personal or financial information",
    "Block the sender if possible",
    "Report as spam to your service provider",
];

pub const LEGITIMATE_RECOMMENDATIONS: [&str; 4] = [
    "Message appears safe, but remain vigilant",
    "Verify the sender's identity if unsure",
    "Avoid sharing sensitive information",
    "Contact the organization directly if claiming to be from a company",
];
