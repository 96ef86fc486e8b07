//! Core result types for the Prompt Firewall.
//!
//! Severity tiers, recommendations and the per-call result records produced
//! by the detector and the output validator. All types are created fresh per
//! call, are immutable once built, and derive Serde traits for audit logging.

use serde::{Deserialize, Serialize};

/// Severity tier derived from the additive pattern-match score.
///
/// Tiers form closed, non-overlapping score bands; every non-negative score
/// maps to exactly one tier:
///
/// | Score | Tier |
/// |-------|----------|
/// | 0 | `None` |
/// | 1-9 | `Low` |
/// | 10-14 | `Medium` |
/// | 15-19 | `High` |
/// | ≥20 | `Critical` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// No patterns matched.
    None,
    /// Weak signal; content is usable after sanitization.
    Low,
    /// Multiple or higher-weight signals; route to review.
    Medium,
    /// Strong signal; block.
    High,
    /// Compounding signals across categories; block.
    Critical,
}

impl Severity {
    /// Maps an additive match score onto its severity tier.
    ///
    /// # Example
    ///
    /// ```rust
    /// use promptgate_firewall::Severity;
    ///
    /// assert_eq!(Severity::from_score(0), Severity::None);
    /// assert_eq!(Severity::from_score(8), Severity::Low);
    /// assert_eq!(Severity::from_score(13), Severity::Medium);
    /// assert_eq!(Severity::from_score(17), Severity::High);
    /// assert_eq!(Severity::from_score(31), Severity::Critical);
    /// ```
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        match score {
            0 => Self::None,
            1..=9 => Self::Low,
            10..=14 => Self::Medium,
            15..=19 => Self::High,
            _ => Self::Critical,
        }
    }

    /// The action recommended for this tier.
    #[must_use]
    pub fn recommendation(&self) -> Recommendation {
        match self {
            Self::None => Recommendation::Allow,
            Self::Low => Recommendation::Sanitize,
            Self::Medium => Recommendation::Review,
            Self::High | Self::Critical => Recommendation::Block,
        }
    }
}

/// Recommended handling for a scanned input.
///
/// The orchestrating pipeline blocks on *any* detection regardless of tier;
/// the finer-grained recommendation exists for callers that surface review
/// queues or telemetry dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// No action needed.
    Allow,
    /// Usable after sanitization.
    Sanitize,
    /// Route to human review.
    Review,
    /// Reject the input.
    Block,
}

/// Result of scanning an input for injection patterns.
///
/// Invariant: `severity == Severity::None` if and only if
/// `detected_patterns` is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectionCheckResult {
    /// True when no patterns matched.
    pub is_clean: bool,
    /// Detection identifiers (`category:pattern-fragment`), in scan order.
    pub detected_patterns: Vec<String>,
    /// Severity tier of the combined score.
    pub severity: Severity,
    /// Sanitized variant of the input, populated regardless of outcome so
    /// callers choosing `Review` can still inspect a cleaned copy.
    pub sanitized_content: String,
    /// Recommended handling.
    pub recommendation: Recommendation,
}

impl InjectionCheckResult {
    /// A clean result for the given (already sanitized) content.
    pub(crate) fn clean(sanitized_content: String) -> Self {
        Self {
            is_clean: true,
            detected_patterns: Vec::new(),
            severity: Severity::None,
            sanitized_content,
            recommendation: Recommendation::Allow,
        }
    }

    /// True when the recommendation is `Block`.
    #[inline]
    #[must_use]
    pub fn should_block(&self) -> bool {
        self.recommendation == Recommendation::Block
    }
}

/// Result of validating model-generated output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentValidation {
    /// True when no issues were found.
    pub is_valid: bool,
    /// Issue-kind tags in detection order. Duplicates are permitted when
    /// independent rules of the same class match; callers needing counts
    /// should count entries, not deduplicate.
    pub issues: Vec<String>,
    /// The redacted text. Equals the trimmed input when valid.
    pub sanitized: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bands_are_closed() {
        assert_eq!(Severity::from_score(0), Severity::None);
        assert_eq!(Severity::from_score(1), Severity::Low);
        assert_eq!(Severity::from_score(9), Severity::Low);
        assert_eq!(Severity::from_score(10), Severity::Medium);
        assert_eq!(Severity::from_score(14), Severity::Medium);
        assert_eq!(Severity::from_score(15), Severity::High);
        assert_eq!(Severity::from_score(19), Severity::High);
        assert_eq!(Severity::from_score(20), Severity::Critical);
        assert_eq!(Severity::from_score(u32::MAX), Severity::Critical);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Severity::None < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_recommendation_per_tier() {
        assert_eq!(Severity::None.recommendation(), Recommendation::Allow);
        assert_eq!(Severity::Low.recommendation(), Recommendation::Sanitize);
        assert_eq!(Severity::Medium.recommendation(), Recommendation::Review);
        assert_eq!(Severity::High.recommendation(), Recommendation::Block);
        assert_eq!(Severity::Critical.recommendation(), Recommendation::Block);
    }

    #[test]
    fn test_severity_serialization() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let parsed: Severity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Severity::Critical);
    }

    #[test]
    fn test_clean_result_invariant() {
        let result = InjectionCheckResult::clean("hello".to_string());
        assert!(result.is_clean);
        assert!(result.detected_patterns.is_empty());
        assert_eq!(result.severity, Severity::None);
        assert!(!result.should_block());
    }
}
