//! Client-side admission control for the Discogs API.
//!
//! Discogs allows 60 authenticated requests per minute. The limiter is a
//! leaky bucket: each admitted request adds one unit to the bucket, and the
//! bucket drains continuously at `max_requests / period`. A request is
//! admitted when the bucket has room for one more unit.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Rate limit settings for outbound calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether outbound calls are throttled at all.
    pub enabled: bool,

    /// Bucket capacity: requests admitted per period.
    pub max_requests: u32,

    /// Length of the period in seconds.
    pub period_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 60,
            period_secs: 60,
        }
    }
}

impl RateLimitConfig {
    /// Build the limiter described by this config, or `None` when disabled.
    pub fn build(&self) -> Option<Arc<dyn RateLimit>> {
        if !self.enabled || self.max_requests == 0 || self.period_secs == 0 {
            return None;
        }
        Some(Arc::new(LeakyBucket::new(
            self.max_requests,
            Duration::from_secs(self.period_secs),
        )))
    }
}

/// Token admission shared by every outbound call.
#[async_trait]
pub trait RateLimit: Send + Sync {
    /// Wait until one request may be issued, then consume its slot.
    async fn acquire(&self);
}

#[derive(Debug)]
struct BucketState {
    level: f64,
    last_leak: Instant,
}

/// Leaky-bucket limiter safe for many concurrent acquirers.
///
/// The state mutex is held while a caller sleeps for room, so waiters are
/// admitted in the order they reached the lock.
#[derive(Debug)]
pub struct LeakyBucket {
    capacity: f64,
    leak_per_sec: f64,
    state: Mutex<BucketState>,
}

impl LeakyBucket {
    /// Create a bucket admitting `max_requests` per `period`.
    pub fn new(max_requests: u32, period: Duration) -> Self {
        let capacity = f64::from(max_requests.max(1));
        let period = period.as_secs_f64().max(f64::EPSILON);
        Self {
            capacity,
            leak_per_sec: capacity / period,
            state: Mutex::new(BucketState {
                level: 0.0,
                last_leak: Instant::now(),
            }),
        }
    }

    /// Bucket matching the documented Discogs ceiling (60 per minute).
    #[cfg(test)]
    pub fn discogs_default() -> Self {
        Self::new(60, Duration::from_secs(60))
    }

    fn leak(&self, state: &mut BucketState) {
        let now = Instant::now();
        let elapsed = now.duration_since(state.last_leak).as_secs_f64();
        state.level = (state.level - elapsed * self.leak_per_sec).max(0.0);
        state.last_leak = now;
    }
}

#[async_trait]
impl RateLimit for LeakyBucket {
    async fn acquire(&self) {
        let mut state = self.state.lock().await;
        loop {
            self.leak(&mut state);
            if state.level + 1.0 <= self.capacity {
                state.level += 1.0;
                return;
            }
            let wait = (state.level + 1.0 - self.capacity) / self.leak_per_sec;
            debug!("Rate limit reached, waiting {:.3}s for a slot", wait);
            tokio::time::sleep(Duration::from_secs_f64(wait)).await;
        }
    }
}


/// Limiter that never waits and counts acquisitions.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct CountingLimiter {
    acquired: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl CountingLimiter {
    pub(crate) fn count(&self) -> usize {
        self.acquired.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl RateLimit for CountingLimiter {
    async fn acquire(&self) {
        self.acquired
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}
