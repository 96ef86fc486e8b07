//! Request and response DTOs for the safety pipeline.

use serde::{Deserialize, Serialize};

/// An inbound AI request, supplied by the calling feature (chat, report
/// generation, natural-language analytics, ...). Immutable once constructed;
/// owned by the caller, not the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiRequest {
    /// Identity of the requesting user.
    pub user_id: String,
    /// Project whose budget the request draws on.
    pub project_id: String,
    /// Logical operation name, e.g. `"chat"` or `"report"`. Rate limits are
    /// tracked per `(user_id, operation)`.
    pub operation: String,
    /// Raw user-supplied input.
    pub user_input: String,
    /// System prompt for the model call.
    pub system_prompt: String,
    /// Model identifier; the pipeline default applies when absent.
    pub model: Option<String>,
    /// Sampling temperature; the pipeline default applies when absent.
    pub temperature: Option<f32>,
    /// Completion token cap; the pipeline default applies when absent.
    pub max_tokens: Option<u32>,
}

impl AiRequest {
    /// A request with default model parameters.
    pub fn new(
        user_id: impl Into<String>,
        project_id: impl Into<String>,
        operation: impl Into<String>,
        user_input: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            project_id: project_id.into(),
            operation: operation.into(),
            user_input: user_input.into(),
            system_prompt: system_prompt.into(),
            model: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the completion token cap.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// The pipeline's single terminal response per request.
///
/// Invariants, enforced by the constructors rather than caller discipline:
/// - `blocked == true` implies `content == None`
/// - `success == true` implies `blocked == false`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiResponse {
    /// True when the model was invoked and a (possibly scrubbed) completion
    /// is attached.
    pub success: bool,
    /// True when a guard stage rejected the request before the model call.
    pub blocked: bool,
    /// The sanitized completion; `None` when blocked or failed.
    pub content: Option<String>,
    /// User-facing reason for a block.
    pub reason: Option<String>,
    /// Cost recorded against the project budget for this request.
    pub cost: Option<f64>,
    /// Tokens consumed, when the provider reported them.
    pub tokens_used: Option<u32>,
    /// True when the provider served the completion from cache.
    pub cached: Option<bool>,
    /// Transport error message when the model call failed.
    pub error: Option<String>,
}

impl AiResponse {
    /// A blocked response. Never carries content.
    #[must_use]
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            blocked: true,
            content: None,
            reason: Some(reason.into()),
            cost: None,
            tokens_used: None,
            cached: None,
            error: None,
        }
    }

    /// A successful response carrying scrubbed content and accounting.
    #[must_use]
    pub fn success(content: String, tokens_used: Option<u32>, cost: f64, cached: bool) -> Self {
        Self {
            success: true,
            blocked: false,
            content: Some(content),
            reason: None,
            cost: Some(cost),
            tokens_used,
            cached: Some(cached),
            error: None,
        }
    }

    /// A failed (but not blocked) response: the model call itself errored.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            blocked: false,
            content: None,
            reason: None,
            cost: None,
            tokens_used: None,
            cached: None,
            error: Some(error.into()),
        }
    }
}
