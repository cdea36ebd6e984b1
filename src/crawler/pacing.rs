//! Pacing gate for polite request spacing
//!
//! A single gate is shared by all fetches in a run, so requests are
//! serialized behind one global clock regardless of which language is
//! being crawled.

use std::time::Duration;
use tokio::time::Instant;

/// Enforces a minimum delay between successive outbound requests
///
/// The gate must be acquired before every network call, including calls
/// that will fail. A `min_delay` of zero disables pacing entirely; no
/// internal floor is imposed.
#[derive(Debug)]
pub struct PacingGate {
    min_delay: Duration,
    last_request: Option<Instant>,
}

impl PacingGate {
    /// Creates a gate with the given minimum inter-request delay
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_request: None,
        }
    }

    /// Waits until the minimum delay since the previous acquisition has
    /// elapsed, then records the new request time
    pub async fn acquire(&mut self) {
        if let Some(last) = self.last_request {
            let ready_at = last + self.min_delay;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }
        self.last_request = Some(Instant::now());
    }

    /// The configured minimum delay
    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }
}
