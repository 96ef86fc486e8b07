//! # Fixed-Window Rate Limiter
//!
//! Per-`(user_id, operation)` request counting with wholesale window
//! replacement on expiry.
//!
//! ## State machine per key
//!
//! | State | Condition | On check |
//! |-------|-----------|----------|
//! | Fresh/Expired | no entry, or `reset_at` passed | replace entry: `count = 1`, allow |
//! | Active, under limit | `count < limit`, window open | increment, allow |
//! | Active, at limit | `count >= limit`, window open | no increment, deny |
//!
//! Rollover is lazy - checked on the next request, never by a background
//! timer. A key that receives no traffic simply never rolls over, which is
//! correct because it also never re-blocks a dormant key.
//!
//! ## Security Notes
//!
//! - Check-and-increment is one atomic read-modify-write under the ledger
//!   mutex: two concurrent requests for the same key cannot both observe
//!   the last remaining slot.
//! - Keys are independent; exhausting one user's window never affects
//!   another user, or another operation of the same user.
//! - Entries are replaced, never merged, on expiry. They are not evicted;
//!   memory is bounded by key cardinality (TTL-based eviction belongs to a
//!   production deployment, not this subsystem).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};

/// Rate limiter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests allowed per window per key.
    pub max_requests: u32,
    /// Window length.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 60,
            window: Duration::from_secs(60),
        }
    }
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateDecision {
    /// Whether the request may proceed.
    pub allowed: bool,
    /// Requests left in the current window after this decision.
    pub remaining: u32,
    /// Time until the window resets; zero when allowed.
    pub retry_after: Duration,
}

/// A counting window for one key.
#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    reset_at: Duration,
}

/// Fixed-window request counter keyed by `(user_id, operation)`.
///
/// The ledger is interior-mutable and safe to share across threads; inject
/// one instance per pipeline rather than holding a process global, so tests
/// get isolated state.
pub struct RateLimiter {
    config: RateLimitConfig,
    clock: Box<dyn Clock>,
    windows: Mutex<HashMap<(String, String), WindowEntry>>,
}

impl RateLimiter {
    /// Limiter on the system clock.
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Limiter on an injected clock (tests).
    #[must_use]
    pub fn with_clock(config: RateLimitConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Check and consume one slot for `(user_id, operation)`.
    ///
    /// The entire read-modify-write happens under the ledger lock.
    pub fn check(&self, user_id: &str, operation: &str) -> RateDecision {
        let now = self.clock.now();
        let mut windows = self.windows.lock().expect("rate ledger lock poisoned");

        let entry = windows
            .entry((user_id.to_string(), operation.to_string()))
            .or_insert(WindowEntry {
                count: 0,
                reset_at: now + self.config.window,
            });

        if entry.reset_at <= now {
            // Lazy rollover: replace the expired window wholesale.
            debug!(user = %user_id, operation = %operation, "rate window rolled over");
            *entry = WindowEntry {
                count: 0,
                reset_at: now + self.config.window,
            };
        }

        if entry.count < self.config.max_requests {
            entry.count += 1;
            RateDecision {
                allowed: true,
                remaining: self.config.max_requests - entry.count,
                retry_after: Duration::ZERO,
            }
        } else {
            let retry_after = entry.reset_at - now;
            warn!(
                user = %user_id,
                operation = %operation,
                retry_after_secs = retry_after.as_secs(),
                "rate limit exceeded"
            );
            RateDecision {
                allowed: false,
                remaining: 0,
                retry_after,
            }
        }
    }
}
