//! Injection detection.
//!
//! Scans text against the pattern catalog, accumulates an additive severity
//! score and recommends an action. Detection runs on every inbound request,
//! so the scan is pure in-memory regex matching with no allocation beyond
//! the result record.

use crate::catalog::{catalog, severity_weight};
use crate::models::{InjectionCheckResult, Severity};
use crate::sanitize::{sanitize_with, SanitizeOptions};

/// Length of the pattern-source fragment embedded in detection identifiers.
const PATTERN_FRAGMENT_CHARS: usize = 40;

/// Pattern-based injection detector.
///
/// Every matched pattern contributes its category weight to a running
/// score; multiple matches across multiple categories all count (severity
/// is additive, not max-of-category, so compounding signals raise
/// confidence). The score maps onto [`Severity`] tiers via closed bands.
///
/// Empty input is treated as clean. This is a deliberate fail-open: the
/// sanitizer, not the detector, is the length/shape gate upstream.
#[derive(Debug, Clone, Default)]
pub struct InjectionDetector {
    options: SanitizeOptions,
}

impl InjectionDetector {
    /// Detector producing sanitized content with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector producing sanitized content with the given options.
    #[must_use]
    pub fn with_options(options: SanitizeOptions) -> Self {
        Self { options }
    }

    /// Scan `content` for injection patterns.
    ///
    /// Well-formed input of any length or content never causes an error;
    /// the result's `sanitized_content` is populated regardless of the
    /// recommendation so callers routing to review can inspect a cleaned
    /// variant.
    #[must_use]
    pub fn detect(&self, content: &str) -> InjectionCheckResult {
        if content.is_empty() {
            return InjectionCheckResult::clean(String::new());
        }

        let mut detected_patterns = Vec::new();
        let mut total_score: u32 = 0;

        for set in catalog() {
            let weight = severity_weight(set.category);
            for pattern in &set.patterns {
                if pattern.is_match(content) {
                    detected_patterns.push(identifier(set.category, pattern.as_str()));
                    total_score += weight;
                }
            }
        }

        let severity = Severity::from_score(total_score);
        let recommendation = severity.recommendation();

        InjectionCheckResult {
            is_clean: detected_patterns.is_empty(),
            detected_patterns,
            severity,
            sanitized_content: sanitize_with(content, &self.options),
            recommendation,
        }
    }

    /// Scan optional content; absent content is clean.
    #[must_use]
    pub fn detect_opt(&self, content: Option<&str>) -> InjectionCheckResult {
        match content {
            Some(text) => self.detect(text),
            None => InjectionCheckResult::clean(String::new()),
        }
    }
}

/// Detection identifier: category plus a truncated pattern source, for
/// internal telemetry. Never echoed to end users.
fn identifier(category: &str, source: &str) -> String {
    let fragment: String = source.chars().take(PATTERN_FRAGMENT_CHARS).collect();
    format!("{category}:{fragment}")
}
