//! # Cost Estimation
//!
//! Deterministic pre-call cost estimate from input length and model
//! identifier. The same function feeds the budget gate before the call and
//! the recording fallback after it, so the two can never disagree; when the
//! provider reports an actual figure, that is preferred for recording.
//!
//! ## Cost Model
//!
//! `tokens = ceil(input_chars / 4) + ASSUMED_OUTPUT_TOKENS`, scaled by a
//! per-model rate per 1,000 tokens:
//!
//! | Model | Rate / 1k tokens |
//! |-------|------------------|
//! | `gpt-4o` | 0.0100 |
//! | `gpt-4o-mini` | 0.0006 |
//! | `gpt-4-turbo` | 0.0200 |
//! | `claude-3-5-sonnet` | 0.0090 |
//! | `claude-3-haiku` | 0.0008 |
//! | anything else | 0.0100 |
//!
//! Four characters per token is a deliberately coarse heuristic; the
//! estimate is not required to match the provider's actual figure, only to
//! be computed identically wherever it is used.

/// Output tokens assumed for the pre-call estimate.
pub const ASSUMED_OUTPUT_TOKENS: u64 = 500;

/// Rate per 1,000 tokens for unrecognized models.
pub const DEFAULT_RATE_PER_1K: f64 = 0.01;

/// Per-model rate per 1,000 tokens, with a default for unknown models.
#[must_use]
pub fn rate_per_1k(model: &str) -> f64 {
    match model {
        "gpt-4o" => 0.01,
        "gpt-4o-mini" => 0.0006,
        "gpt-4-turbo" => 0.02,
        "claude-3-5-sonnet" => 0.009,
        "claude-3-haiku" => 0.0008,
        _ => DEFAULT_RATE_PER_1K,
    }
}

/// Estimated total tokens for an input: `ceil(chars / 4)` plus the assumed
/// output allowance.
#[must_use]
pub fn estimate_tokens(input: &str) -> u64 {
    let chars = input.chars().count() as u64;
    chars.div_ceil(4) + ASSUMED_OUTPUT_TOKENS
}

/// Estimated cost in currency units for `input` against `model`.
///
/// # Example
///
/// ```rust
/// use promptgate_limits::estimate_cost;
///
/// // Identical inputs always estimate identically.
/// let a = estimate_cost("summarize this document", "gpt-4o");
/// let b = estimate_cost("summarize this document", "gpt-4o");
/// assert_eq!(a, b);
/// ```
#[must_use]
pub fn estimate_cost(input: &str, model: &str) -> f64 {
    estimate_tokens(input) as f64 / 1000.0 * rate_per_1k(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_estimate_rounds_up() {
        assert_eq!(estimate_tokens(""), ASSUMED_OUTPUT_TOKENS);
        assert_eq!(estimate_tokens("abcd"), 1 + ASSUMED_OUTPUT_TOKENS);
        assert_eq!(estimate_tokens("abcde"), 2 + ASSUMED_OUTPUT_TOKENS);
        assert_eq!(estimate_tokens("abcdefgh"), 2 + ASSUMED_OUTPUT_TOKENS);
    }

    #[test]
    fn test_token_estimate_counts_chars_not_bytes() {
        // Four multi-byte characters are still one input token.
        assert_eq!(estimate_tokens("éééé"), 1 + ASSUMED_OUTPUT_TOKENS);
    }

    #[test]
    fn test_known_model_rates() {
        assert_eq!(rate_per_1k("gpt-4o"), 0.01);
        assert_eq!(rate_per_1k("claude-3-haiku"), 0.0008);
    }

    #[test]
    fn test_unknown_model_uses_default_rate() {
        assert_eq!(rate_per_1k("some-future-model"), DEFAULT_RATE_PER_1K);
    }

    #[test]
    fn test_cost_scales_with_rate() {
        let input = "abcd";
        // 501 tokens at 0.01/1k vs 0.02/1k.
        assert_eq!(estimate_cost(input, "gpt-4o"), 501.0 / 1000.0 * 0.01);
        assert_eq!(estimate_cost(input, "gpt-4-turbo"), 501.0 / 1000.0 * 0.02);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let input = "the same prompt";
        assert_eq!(
            estimate_cost(input, "gpt-4o-mini"),
            estimate_cost(input, "gpt-4o-mini")
        );
    }
}
