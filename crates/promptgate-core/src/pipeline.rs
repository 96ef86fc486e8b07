//! The request pipeline.
//!
//! Orchestrates shape validation, injection detection, rate limiting,
//! budget enforcement, the external model call, output validation and cost
//! recording - in that fixed order, first failure wins. No stage after a
//! block executes.

use promptgate_firewall::{validate_output, InjectionDetector};
use promptgate_limits::{estimate_cost, BudgetGuard, Clock, RateLimiter};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::request::{AiRequest, AiResponse};
use crate::transport::{ModelCall, ModelTransport};

/// Block reason for empty or blank input.
const REASON_EMPTY: &str = "Empty input";
/// Block reason for input over the hard length cap.
const REASON_TOO_LONG: &str = "Input too long";
/// Block reason for any injection detection. Deliberately generic: pattern
/// identifiers are internal telemetry, never echoed to the user.
const REASON_INJECTION: &str = "Prompt injection detected";
/// Block reason when the rate window is exhausted.
const REASON_RATE_LIMIT: &str = "Rate limit exceeded";
/// Block reason when the project budget is exhausted.
const REASON_BUDGET: &str = "Budget exceeded";

/// The unified safety pipeline.
///
/// Every user-supplied prompt passes through this gate before reaching the
/// model, and every completion passes back through it before reaching the
/// caller. The pipeline is stateless between requests except through the
/// rate limiter's and budget guard's ledgers.
///
/// # Stage order
///
/// 1. Shape validation (empty / oversized input)
/// 2. Injection detection on the raw input - *any* detection blocks, not
///    only block-recommended tiers; the finer tiers feed telemetry
/// 3. Rate limit check per `(user, operation)`
/// 4. Budget check per project, using the deterministic estimate
/// 5. Model invocation with the *sanitized* input (the only await point)
/// 6. Output validation - always proceeds with the scrubbed text
/// 7. Cost recording (provider-reported figure preferred)
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = RequestPipeline::new(PipelineConfig::default(), transport);
/// let response = pipeline.process(&request).await;
/// if response.blocked {
///     render_block(response.reason);
/// }
/// ```
pub struct RequestPipeline<T: ModelTransport> {
    config: PipelineConfig,
    detector: InjectionDetector,
    limiter: RateLimiter,
    budget: BudgetGuard,
    transport: T,
}

impl<T: ModelTransport> RequestPipeline<T> {
    /// Pipeline on the system clock.
    #[must_use]
    pub fn new(config: PipelineConfig, transport: T) -> Self {
        let limiter = RateLimiter::new(config.limiter.clone());
        Self::assemble(config, transport, limiter)
    }

    /// Pipeline on an injected clock, for deterministic window tests.
    #[must_use]
    pub fn with_clock(config: PipelineConfig, transport: T, clock: Box<dyn Clock>) -> Self {
        let limiter = RateLimiter::with_clock(config.limiter.clone(), clock);
        Self::assemble(config, transport, limiter)
    }

    fn assemble(config: PipelineConfig, transport: T, limiter: RateLimiter) -> Self {
        let detector = InjectionDetector::with_options(config.sanitizer.clone());
        let budget = BudgetGuard::new(config.budget.clone());
        Self {
            config,
            detector,
            limiter,
            budget,
            transport,
        }
    }

    /// The budget guard, for telemetry and reconciliation hooks.
    #[must_use]
    pub fn budget(&self) -> &BudgetGuard {
        &self.budget
    }

    /// Run one request through the full pipeline.
    ///
    /// Never returns an error for a well-formed request: every guard
    /// outcome is a `blocked` response and a transport failure is a
    /// non-blocked failure response.
    pub async fn process(&self, request: &AiRequest) -> AiResponse {
        let request_id = Uuid::new_v4();
        debug!(
            %request_id,
            user = %request.user_id,
            operation = %request.operation,
            "processing request"
        );

        // Stage 1: shape validation. Hard caps, independent of the
        // sanitizer's configurable truncation.
        if request.user_input.trim().is_empty() {
            debug!(%request_id, "blocked: empty input");
            return AiResponse::blocked(REASON_EMPTY);
        }
        if request.user_input.chars().count() > self.config.input.max_input_chars {
            warn!(%request_id, user = %request.user_id, "blocked: input too long");
            return AiResponse::blocked(REASON_TOO_LONG);
        }

        // Stage 2: injection detection on the raw input.
        let check = self.detector.detect(&request.user_input);
        if !check.detected_patterns.is_empty() {
            warn!(
                %request_id,
                user = %request.user_id,
                severity = ?check.severity,
                patterns = ?check.detected_patterns,
                "blocked: injection detected"
            );
            return AiResponse::blocked(REASON_INJECTION);
        }

        // Stage 3: rate limit.
        let decision = self.limiter.check(&request.user_id, &request.operation);
        if !decision.allowed {
            return AiResponse::blocked(REASON_RATE_LIMIT);
        }

        // Stage 4: budget, on the same estimate the recording fallback uses.
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.model.default_model);
        let estimated = estimate_cost(&request.user_input, model);
        if !self.budget.check(&request.project_id, estimated) {
            return AiResponse::blocked(REASON_BUDGET);
        }

        // Stage 5: the model call - the pipeline's only suspension point.
        let call = ModelCall {
            input: &check.sanitized_content,
            system_prompt: &request.system_prompt,
            model,
            temperature: request
                .temperature
                .unwrap_or(self.config.model.default_temperature),
            max_tokens: request
                .max_tokens
                .unwrap_or(self.config.model.default_max_tokens),
        };
        let reply = match self.transport.invoke(call).await {
            Ok(reply) => reply,
            Err(error) => {
                // A failed call may still have cost money; never lose that.
                if let Some(cost) = error.incurred_cost() {
                    self.budget.record(&request.project_id, cost);
                }
                warn!(%request_id, %error, "model call failed");
                return AiResponse::failure(error.to_string());
            }
        };

        // Stage 6: output validation. A leak never fails the request; the
        // scrubbed text is what the caller receives.
        let validation = validate_output(&reply.content);
        if !validation.is_valid {
            warn!(
                %request_id,
                issues = ?validation.issues,
                "output scrubbed"
            );
        }

        // Stage 7: settle spend. Provider-reported cost wins over the
        // estimate.
        let cost = reply.cost.unwrap_or(estimated);
        self.budget.record(&request.project_id, cost);

        info!(%request_id, cost, cached = reply.cached, "request completed");
        AiResponse::success(validation.sanitized, reply.tokens_used, cost, reply.cached)
    }
}
