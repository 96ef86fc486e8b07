//! # PromptGate Core
//!
//! Unified AI safety pipeline: the gate every user-supplied prompt and every
//! generated completion passes through around a language-model call.
//!
//! ## Threat Coverage
//!
//! | Stage | Component | Threats handled |
//! |-------|-----------|-----------------|
//! | Input | Prompt Firewall | Injection, hijack, extraction, delimiter abuse |
//! | Capacity | Rate Limiter | Per-user request floods |
//! | Spend | Budget Guard | Per-project cost overruns |
//! | Output | Output Validator | Prompt leaks, credential leaks, role markers |
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                       REQUEST PIPELINE                         │
//! ├────────────────────────────────────────────────────────────────┤
//! │                                                                │
//! │  AiRequest                                                     │
//! │     │                                                          │
//! │     ▼                                                          │
//! │  shape ──▶ detect ──▶ rate ──▶ budget ──▶ [model] ──▶ output   │
//! │    │          │         │        │           │          │      │
//! │    ▼          ▼         ▼        ▼           ▼          ▼      │
//! │  block      block     block    block      failure    scrub +   │
//! │                                                      record    │
//! │                                                        │       │
//! │                                                        ▼       │
//! │                                                   AiResponse   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Notes
//!
//! - Stages run in fixed order; the first failing stage wins and no later
//!   stage executes.
//! - The orchestrator blocks on *any* injection detection; the detector's
//!   finer severity tiers exist for telemetry and review tooling.
//! - Block reasons for security stages are generic by design - detected
//!   pattern identifiers go to internal telemetry only, so the response
//!   never teaches an attacker which patterns are covered.
//! - Output anomalies never fail the request: a redacted leak is no longer
//!   user-facing risk, and failing the whole request would be a worse
//!   experience than silently cleaning it.
//! - The only mutable shared state is the limiter's and guard's ledgers;
//!   each is updated by single atomic read-modify-write operations.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use promptgate_core::{AiRequest, PipelineConfig, RequestPipeline};
//!
//! let pipeline = RequestPipeline::new(PipelineConfig::default(), transport);
//!
//! let request = AiRequest::new("user-7", "proj-1", "chat",
//!     "What is the capital of France?", "You answer concisely.");
//!
//! let response = pipeline.process(&request).await;
//! assert!(response.success);
//! ```

mod config;
mod pipeline;
mod request;
mod transport;

pub use config::{InputConfig, ModelConfig, PipelineConfig};
pub use pipeline::RequestPipeline;
pub use request::{AiRequest, AiResponse};
pub use transport::{ModelCall, ModelReply, ModelTransport, TransportError};

// Re-export component types for convenience
pub use promptgate_firewall::{
    sanitize, validate_output, ContentValidation, InjectionCheckResult, InjectionDetector,
    Recommendation, SanitizeOptions, Severity,
};
pub use promptgate_limits::{
    estimate_cost, BudgetConfig, BudgetGuard, Clock, ManualClock, RateLimitConfig, RateLimiter,
    SystemClock,
};
