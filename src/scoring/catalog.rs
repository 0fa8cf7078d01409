//! Indicator Catalog
//!
//! The fixed, ordered set of weighted detectors. Built once at startup, either
//! from the built-in definitions or from a JSON file, and never mutated after.

use std::collections::HashSet;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::Severity;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("indicator catalog is empty")]
    Empty,

    #[error("duplicate indicator type '{0}'")]
    DuplicateType(String),

    #[error("indicator '{0}' must have a positive weight")]
    ZeroWeight(String),

    #[error("total catalog weight overflows at indicator '{0}'")]
    WeightOverflow(String),

    #[error("indicator '{name}' has an invalid pattern: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

// ============================================================================
// DEFINITIONS
// ============================================================================

/// Static description of one detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorDefinition {
    #[serde(rename = "type")]
    pub indicator_type: String,
    pub description: String,
    pub severity: Severity,
    /// Case-insensitive regular expression tested against the whole input
    pub pattern: String,
    pub weight: u32,
}

impl IndicatorDefinition {
    fn new(indicator_type: &str, description: &str, severity: Severity, pattern: &str, weight: u32) -> Self {
        Self {
            indicator_type: indicator_type.to_string(),
            description: description.to_string(),
            severity,
            pattern: pattern.to_string(),
            weight,
        }
    }
}

/// The eight built-in indicators, in output order
pub fn builtin_definitions() -> Vec<IndicatorDefinition> {
    vec![
        IndicatorDefinition::new(
            "Suspicious URLs",
            "Contains links, shortened URLs or raw IP addresses",
            Severity::High,
            r"https?://|\bwww\.|\bbit\.ly\b|\btinyurl\b|\bgoo\.gl\b|\bt\.co/|\b\d{1,3}(?:\.\d{1,3}){3}\b|\.(?:tk|xyz|top|zip)\b",
            25,
        ),
        IndicatorDefinition::new(
            "Urgent Language",
            "Uses pressure tactics or urgent requests",
            Severity::Medium,
            r"\b(?:urgent|urgently|immediately|act now|right away|within 24 hours|expires?|final notice|asap|limited time|hurry)\b",
            15,
        ),
        IndicatorDefinition::new(
            "Spelling Errors",
            "Contains misspellings common in phishing messages",
            Severity::Low,
            r"\b(?:recieve|recieved|acount|verfy|verifiy|pasword|securty|suspeneded|informations|kindly)\b",
            10,
        ),
        IndicatorDefinition::new(
            "Generic Greetings",
            "Addresses the reader impersonally",
            Severity::Medium,
            r"\b(?:dear (?:customer|user|member|sir|madam|client|account holder|valued customer)|valued customer|hello user)\b",
            12,
        ),
        IndicatorDefinition::new(
            "Request for Credentials",
            "Asks for passwords, PINs or other login details",
            Severity::High,
            r"\b(?:password|passcode|login details|log ?in credentials|verify your (?:account|identity)|confirm your (?:account|password|details|identity)|pin|otp|ssn|social security|credit card number|card details|bank details|username)\b",
            30,
        ),
        IndicatorDefinition::new(
            "Suspicious Attachments",
            "References executable or archive attachments",
            Severity::High,
            r"\.(?:exe|scr|zip|rar|js|vbs|docm|xlsm)\b|\bopen the attach(?:ment|ed)\b|\bsee attached invoice\b|\bdownload the (?:file|attachment)\b",
            20,
        ),
        IndicatorDefinition::new(
            "Financial Threats",
            "Threatens account suspension, penalties or loss of funds",
            Severity::High,
            r"\b(?:suspend|suspended|locked|terminated|(?:account|card) (?:has been |will be |is )?closed|unauthori[sz]ed (?:transaction|access|charge)|legal action|penalty|(?:pay|issued|face) a fine|overdue|debt|frozen)\b",
            22,
        ),
        IndicatorDefinition::new(
            "Impersonation",
            "Claims to come from a well-known company or official team",
            Severity::High,
            r"\b(?:paypal|amazon|apple|microsoft|netflix|irs|bank of \w+|security team|support team|it department|administrator)\b",
            18,
        ),
    ]
}

// ============================================================================
// COMPILED CATALOG
// ============================================================================

/// A definition paired with its compiled pattern
#[derive(Debug, Clone)]
pub struct CompiledIndicator {
    pub definition: IndicatorDefinition,
    regex: Regex,
}

impl CompiledIndicator {
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Validated, immutable indicator catalog
#[derive(Debug, Clone)]
pub struct IndicatorCatalog {
    indicators: Vec<CompiledIndicator>,
}

impl IndicatorCatalog {
    /// Catalog with the built-in definitions
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_definitions(builtin_definitions())
    }

    /// Validate and compile a list of definitions
    pub fn from_definitions(definitions: Vec<IndicatorDefinition>) -> Result<Self, CatalogError> {
        if definitions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        let mut indicators = Vec::with_capacity(definitions.len());
        let mut total_weight: u32 = 0;

        for definition in definitions {
            if !seen.insert(definition.indicator_type.clone()) {
                return Err(CatalogError::DuplicateType(definition.indicator_type));
            }
            if definition.weight == 0 {
                return Err(CatalogError::ZeroWeight(definition.indicator_type));
            }
            // Any subset of matches must sum without overflow
            total_weight = total_weight
                .checked_add(definition.weight)
                .ok_or_else(|| CatalogError::WeightOverflow(definition.indicator_type.clone()))?;

            let regex = RegexBuilder::new(&definition.pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| CatalogError::InvalidPattern {
                    name: definition.indicator_type.clone(),
                    source,
                })?;

            indicators.push(CompiledIndicator { definition, regex });
        }

        Ok(Self { indicators })
    }

    /// Load definitions from a JSON array file
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let definitions: Vec<IndicatorDefinition> = serde_json::from_str(&raw)?;
        Self::from_definitions(definitions)
    }

    /// File override if given, built-in otherwise
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(p) => {
                tracing::info!("Loading indicator catalog from {:?}", p);
                Self::from_json_file(p)
            }
            None => Self::builtin(),
        }
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledIndicator> {
        self.indicators.iter()
    }

    /// Sum of all weights, i.e. the score when every indicator fires
    pub fn max_score(&self) -> u32 {
        self.indicators.iter().map(|i| i.definition.weight).sum()
    }

    pub fn definitions(&self) -> Vec<IndicatorDefinition> {
        self.indicators.iter().map(|i| i.definition.clone()).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn matched(catalog: &IndicatorCatalog, text: &str) -> Vec<String> {
        catalog
            .iter()
            .filter(|i| i.matches(text))
            .map(|i| i.definition.indicator_type.clone())
            .collect()
    }

    #[test]
    fn test_builtin_weights_and_severities() {
        let catalog = IndicatorCatalog::builtin().unwrap();
        let expected = [
            ("Suspicious URLs", Severity::High, 25),
            ("Urgent Language", Severity::Medium, 15),
            ("Spelling Errors", Severity::Low, 10),
            ("Generic Greetings", Severity::Medium, 12),
            ("Request for Credentials", Severity::High, 30),
            ("Suspicious Attachments", Severity::High, 20),
            ("Financial Threats", Severity::High, 22),
            ("Impersonation", Severity::High, 18),
        ];

        assert_eq!(catalog.len(), expected.len());
        for (indicator, (name, severity, weight)) in catalog.iter().zip(expected) {
            assert_eq!(indicator.definition.indicator_type, name);
            assert_eq!(indicator.definition.severity, severity);
            assert_eq!(indicator.definition.weight, weight);
        }
        assert_eq!(catalog.max_score(), 152);
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        let catalog = IndicatorCatalog::builtin().unwrap();
        assert_eq!(matched(&catalog, "URGENT"), vec!["Urgent Language"]);
        assert_eq!(matched(&catalog, "urgent"), vec!["Urgent Language"]);
        assert_eq!(matched(&catalog, "PayPal"), vec!["Impersonation"]);
    }

    #[test]
    fn test_phishing_sample_matches_expected_categories() {
        let catalog = IndicatorCatalog::builtin().unwrap();
        let text = "URGENT: verify your password now or your account will be suspended! http://bit.ly/xyz";
        assert_eq!(
            matched(&catalog, text),
            vec![
                "Suspicious URLs",
                "Urgent Language",
                "Request for Credentials",
                "Financial Threats",
            ]
        );
    }

    #[test]
    fn test_benign_sample_matches_nothing() {
        let catalog = IndicatorCatalog::builtin().unwrap();
        assert!(matched(&catalog, "Hi John, let's meet for lunch tomorrow at noon.").is_empty());
    }

    #[test]
    fn test_word_boundaries_avoid_false_positives() {
        let catalog = IndicatorCatalog::builtin().unwrap();
        // "first" contains "irs", "shopping" contains "pin"
        assert!(matched(&catalog, "The first shopping trip was great").is_empty());
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let mut defs = builtin_definitions();
        defs.push(defs[0].clone());
        let err = IndicatorCatalog::from_definitions(defs).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateType(name) if name == "Suspicious URLs"));
    }

    #[test]
    fn test_invalid_pattern_and_zero_weight_rejected() {
        let mut bad_pattern = builtin_definitions();
        bad_pattern[1].pattern = "(unclosed".to_string();
        assert!(matches!(
            IndicatorCatalog::from_definitions(bad_pattern),
            Err(CatalogError::InvalidPattern { .. })
        ));

        let mut zero = builtin_definitions();
        zero[2].weight = 0;
        assert!(matches!(
            IndicatorCatalog::from_definitions(zero),
            Err(CatalogError::ZeroWeight(_))
        ));

        assert!(matches!(
            IndicatorCatalog::from_definitions(vec![]),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn test_overflowing_total_weight_rejected() {
        let heavy = |name: &str| IndicatorDefinition::new(name, "", Severity::High, name, u32::MAX / 2 + 1);
        let err = IndicatorCatalog::from_definitions(vec![heavy("alpha"), heavy("beta")]).unwrap_err();
        assert!(matches!(err, CatalogError::WeightOverflow(name) if name == "beta"));

        let fits = IndicatorCatalog::from_definitions(vec![
            IndicatorDefinition::new("alpha", "", Severity::High, "alpha", u32::MAX - 1),
            IndicatorDefinition::new("beta", "", Severity::High, "beta", 1),
        ])
        .unwrap();
        assert_eq!(fits.max_score(), u32::MAX);
    }

    #[test]
    fn test_everyday_wording_is_not_a_financial_threat() {
        let catalog = IndicatorCatalog::builtin().unwrap();
        assert!(matched(&catalog, "I'm fine, the shop is closed on Sundays").is_empty());
        assert_eq!(
            matched(&catalog, "Your account has been closed"),
            vec!["Financial Threats"]
        );
        assert_eq!(matched(&catalog, "You will pay a fine"), vec!["Financial Threats"]);
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"type":"Crypto Giveaway","description":"Promises free coins","severity":"high","pattern":"\\b(?:bitcoin|giveaway)\\b","weight":40}}]"#
        )
        .unwrap();

        let catalog = IndicatorCatalog::load(Some(file.path())).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(matched(&catalog, "Huge BITCOIN giveaway"), vec!["Crypto Giveaway"]);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = IndicatorCatalog::load(Some(Path::new("/nonexistent/catalog.json"))).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
