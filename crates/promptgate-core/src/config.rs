//! Configuration types for the safety pipeline.

use promptgate_firewall::SanitizeOptions;
use promptgate_limits::{BudgetConfig, RateLimitConfig};
use serde::{Deserialize, Serialize};

/// Configuration for the request pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Input shape limits.
    pub input: InputConfig,

    /// Input sanitizer options.
    pub sanitizer: SanitizeOptions,

    /// Rate limiter configuration.
    pub limiter: RateLimitConfig,

    /// Budget guard configuration.
    pub budget: BudgetConfig,

    /// Model defaults applied when the request leaves them unset.
    pub model: ModelConfig,
}

/// Hard input caps, independent of the sanitizer's configurable truncation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Maximum accepted input length in characters; longer input is
    /// rejected, not truncated.
    pub max_input_chars: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 100_000,
        }
    }
}

/// Defaults for unspecified model parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model used when the request names none.
    pub default_model: String,
    /// Temperature used when the request sets none.
    pub default_temperature: f32,
    /// Completion token cap used when the request sets none.
    pub default_max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default_model: "gpt-4o-mini".to_string(),
            default_temperature: 0.7,
            default_max_tokens: 1024,
        }
    }
}
