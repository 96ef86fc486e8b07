//! Model-invocation transport seam.
//!
//! The pipeline never talks to a provider directly; it hands the sanitized
//! input to a [`ModelTransport`] implementation and consumes the reply. The
//! transport call is the pipeline's only suspension point - everything
//! before and after it is synchronous in-memory computation.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameters for one model invocation. Borrowed from the request; the
/// transport owns nothing.
#[derive(Debug, Clone, Copy)]
pub struct ModelCall<'a> {
    /// Sanitized user input.
    pub input: &'a str,
    /// System prompt, passed through untouched.
    pub system_prompt: &'a str,
    /// Model identifier.
    pub model: &'a str,
    /// Sampling temperature.
    pub temperature: f32,
    /// Completion token cap.
    pub max_tokens: u32,
}

/// A completed model invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelReply {
    /// Raw generated text, pre-validation.
    pub content: String,
    /// Actual tokens consumed, when the provider reports them.
    pub tokens_used: Option<u32>,
    /// Actual cost, when the provider reports it. Preferred over the
    /// pre-call estimate for budget recording.
    pub cost: Option<f64>,
    /// True when served from the provider's cache.
    pub cached: bool,
}

/// Errors crossing the transport boundary.
///
/// A failed or cancelled call may still have incurred provider cost; the
/// pipeline records any cost the error carries so budget accounting is not
/// silently lost.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The provider could not be reached at all.
    #[error("model provider unavailable: {0}")]
    Unavailable(String),

    /// The call reached the provider and failed.
    #[error("model call failed: {message}")]
    Failed {
        /// Provider-reported failure detail.
        message: String,
        /// Cost already incurred despite the failure, if known.
        incurred_cost: Option<f64>,
    },

    /// The call was abandoned after the deadline.
    #[error("model call timed out after {seconds}s")]
    Timeout {
        /// Deadline that elapsed.
        seconds: u64,
        /// Cost already incurred despite the timeout, if known.
        incurred_cost: Option<f64>,
    },
}

impl TransportError {
    /// Cost known to have been incurred despite the error.
    #[must_use]
    pub fn incurred_cost(&self) -> Option<f64> {
        match self {
            Self::Unavailable(_) => None,
            Self::Failed { incurred_cost, .. } | Self::Timeout { incurred_cost, .. } => {
                *incurred_cost
            }
        }
    }
}

/// The external model-invocation boundary.
///
/// Implementations are expected to handle retries, connection pooling and
/// cancellation internally; the pipeline only awaits the final outcome.
pub trait ModelTransport: Send + Sync {
    /// Invoke the model with the given call parameters.
    fn invoke(
        &self,
        call: ModelCall<'_>,
    ) -> impl Future<Output = Result<ModelReply, TransportError>> + Send;
}
