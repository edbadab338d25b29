//! Request scheduling for the single-connection crawler
//!
//! The crawler talks to one site over one connection, so scheduling reduces
//! to a clock: before each request the limiter works out the next instant a
//! request may start and suspends the caller until then.
//!
//! The delay is fixed and applied before every request, however long the
//! previous one took. There is no burst allowance.

use crate::config::MIN_REQUESTS_PER_SECOND;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Fixed-delay request scheduler
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Delay applied before every request
    interval: Duration,

    /// When the previous request was allowed to start
    last_start: Option<Instant>,
}

impl RateLimiter {
    /// Creates a limiter with an explicit delay
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_start: None,
        }
    }

    /// Creates a limiter for a requests-per-second rate
    ///
    /// Rates below 0.1 (including zero, negative and NaN) are raised to 0.1.
    pub fn from_rps(requests_per_second: f64) -> Self {
        let rps = if requests_per_second.is_nan() {
            MIN_REQUESTS_PER_SECOND
        } else {
            requests_per_second.max(MIN_REQUESTS_PER_SECOND)
        };
        Self::new(Duration::from_secs_f64(1.0 / rps))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Computes the earliest instant the next request may start
    ///
    /// Always at least one full interval after `now`, and never less than one
    /// interval after the previous start.
    pub fn next_allowed(&self, now: Instant) -> Instant {
        let after_delay = now + self.interval;
        match self.last_start {
            Some(last) => after_delay.max(last + self.interval),
            None => after_delay,
        }
    }

    /// Waits until the next request may start and records it as started
    ///
    /// # Returns
    ///
    /// The instant the request was cleared to start
    pub async fn acquire(&mut self) -> Instant {
        let deadline = self.next_allowed(Instant::now());
        sleep_until(deadline).await;
        self.last_start = Some(deadline);
        deadline
    }
}
