//! # PromptGate Limits - Capacity Enforcement
//!
//! Per-user rate limiting and per-project budget enforcement for the
//! PromptGate pipeline. Both ledgers are in-memory, process-lifetime state
//! shared across concurrent requests; this crate owns the only mutable
//! shared state in the whole subsystem.
//!
//! ## Threat Model
//!
//! Without capacity limits, a single tenant of a multi-tenant system can:
//! - **Flood the provider**: unbounded request volume from one user drives
//!   up latency and cost for everyone.
//! - **Drain a project budget**: runaway automation (or a compromised
//!   account) burns through spend long before billing reconciliation runs.
//!
//! ## Design
//!
//! | Component | Discipline | Key |
//! |-----------|------------|-----|
//! | [`RateLimiter`] | Fixed window, lazy rollover | `(user_id, operation)` |
//! | [`BudgetGuard`] | Monotonic cost ledger vs. ceiling | `project_id` |
//!
//! Checks happen BEFORE the guarded model call; cost recording happens after
//! it. Check-and-increment (and check-and-add) are each a single atomic
//! read-modify-write under the ledger mutex, so two concurrent requests for
//! the same key can never both observe the last remaining slot.
//!
//! ## Security Notes
//!
//! - Enforcement MUST happen before the model call, never after.
//! - The ledgers never shrink within this subsystem; resets and billing
//!   rollover are an external concern.
//! - Time is injected through [`Clock`] so window rollover is testable
//!   without sleeping.

pub mod budget;
pub mod clock;
pub mod cost;
pub mod rate;

pub use budget::{BudgetConfig, BudgetGuard};
pub use clock::{Clock, ManualClock, SystemClock};
pub use cost::{estimate_cost, estimate_tokens, rate_per_1k, ASSUMED_OUTPUT_TOKENS};
pub use rate::{RateDecision, RateLimitConfig, RateLimiter};
