//! # Budget Guard
//!
//! Per-project running-cost ledger compared against a configured ceiling
//! before each request proceeds.
//!
//! ## Design
//!
//! The ledger is a monotonically increasing accumulator: `record` only ever
//! adds, never subtracts, within this subsystem. Billing-cycle rollover and
//! reconciliation against persisted usage are external concerns. A project
//! with no ledger entry has accumulated nothing.
//!
//! The ceiling check is inclusive: a request whose estimate lands exactly on
//! the ceiling is allowed; any positive overshoot is denied.
//!
//! ## Security Notes
//!
//! - The check MUST use the same deterministic estimate as the pre-call
//!   gate (see [`crate::cost`]); actual provider-reported cost is preferred
//!   for recording when available.
//! - Checks and recordings are each atomic under the ledger mutex.
//! - Denied checks leave the ledger untouched.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Budget configuration: a global default ceiling with optional per-project
/// overrides, in currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Ceiling applied to projects without an override.
    pub default_ceiling: f64,
    /// Per-project ceiling overrides.
    pub project_ceilings: HashMap<String, f64>,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            default_ceiling: 100.0,
            project_ceilings: HashMap::new(),
        }
    }
}

/// Per-project accumulated-cost ledger with ceiling enforcement.
///
/// Inject one instance per pipeline rather than holding a process global,
/// so tests get isolated ledgers and multi-instance deployments can swap in
/// a distributed store behind the same surface.
pub struct BudgetGuard {
    config: BudgetConfig,
    ledger: Mutex<HashMap<String, f64>>,
}

impl BudgetGuard {
    /// Guard with an empty ledger.
    #[must_use]
    pub fn new(config: BudgetConfig) -> Self {
        Self {
            config,
            ledger: Mutex::new(HashMap::new()),
        }
    }

    /// True iff `accumulated + estimated_cost` stays within the project's
    /// ceiling (inclusive).
    pub fn check(&self, project_id: &str, estimated_cost: f64) -> bool {
        let ledger = self.ledger.lock().expect("budget ledger lock poisoned");
        let accumulated = ledger.get(project_id).copied().unwrap_or(0.0);
        let ceiling = self.ceiling_for(project_id);
        let allowed = accumulated + estimated_cost <= ceiling;
        if !allowed {
            warn!(
                project = %project_id,
                accumulated,
                estimated = estimated_cost,
                ceiling,
                "budget ceiling exceeded"
            );
        }
        allowed
    }

    /// Add `cost` to the project's running total.
    ///
    /// Only invoked after a model call. Monotonic: negative inputs are
    /// clamped to zero so the ledger never decreases.
    pub fn record(&self, project_id: &str, cost: f64) {
        let mut ledger = self.ledger.lock().expect("budget ledger lock poisoned");
        *ledger.entry(project_id.to_string()).or_insert(0.0) += cost.max(0.0);
    }

    /// The project's accumulated cost so far (0 when unseen).
    pub fn accumulated(&self, project_id: &str) -> f64 {
        let ledger = self.ledger.lock().expect("budget ledger lock poisoned");
        ledger.get(project_id).copied().unwrap_or(0.0)
    }

    fn ceiling_for(&self, project_id: &str) -> f64 {
        self.config
            .project_ceilings
            .get(project_id)
            .copied()
            .unwrap_or(self.config.default_ceiling)
    }
}
