use std::time::Duration;

use chrono::{DateTime, Utc};

/// Returns true iff `now - start <= max_latency`.
///
/// `now` is passed in rather than read from the clock. A `start` in the
/// future (clock skew) gives a negative elapsed time, which is always within
/// budget.
pub fn within_budget(start: DateTime<Utc>, max_latency: Duration, now: DateTime<Utc>) -> bool {
    let elapsed = now - start;
    match elapsed.to_std() {
        Ok(elapsed) => elapsed <= max_latency,
        // to_std only fails for negative deltas
        Err(_) => true,
    }
}

/// Latency budget enforcement with a fixed maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyGuard {
    max_latency: Duration,
}

impl LatencyGuard {
    pub fn new(max_latency: Duration) -> Self {
        Self { max_latency }
    }

    pub fn max_latency(&self) -> Duration {
        self.max_latency
    }

    pub fn within_budget(&self, start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        within_budget(start, self.max_latency, now)
    }
}
