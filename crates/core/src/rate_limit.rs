//! Token bucket rate limiting
//!
//! Each key (usually an endpoint path) gets its own bucket holding
//! `max_requests + burst` tokens, refilled at `max_requests / window`.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use storefront_core::rate_limit::{RateLimitConfig, RateLimiter};
//!
//! let limiter = RateLimiter::new(RateLimitConfig::strict(1, Duration::from_secs(60)));
//! assert!(limiter.try_acquire("api/products"));
//! assert!(!limiter.try_acquire("api/products"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Rate limiter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests allowed per window
    pub max_requests: u32,
    /// Window duration
    pub window: Duration,
    /// Extra requests allowed in short bursts
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::per_minute(100)
    }
}

impl RateLimitConfig {
    /// No burst allowance
    #[must_use]
    pub fn strict(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            burst: 0,
        }
    }

    /// Per-minute limit with a quarter as burst
    #[must_use]
    pub fn per_minute(max: u32) -> Self {
        Self {
            max_requests: max,
            window: Duration::from_secs(60),
            burst: max / 4,
        }
    }

    fn capacity(&self) -> f64 {
        f64::from(self.max_requests) + f64::from(self.burst)
    }

    fn refill_rate(&self) -> f64 {
        f64::from(self.max_requests) / self.window.as_secs_f64()
    }
}

#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
}

impl TokenBucket {
    fn full(config: &RateLimitConfig) -> Self {
        Self {
            tokens: config.capacity(),
            last_update: Instant::now(),
        }
    }

    fn refill(&mut self, config: &RateLimitConfig) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();
        self.tokens = (self.tokens + elapsed * config.refill_rate()).min(config.capacity());
        self.last_update = now;
    }

    fn wait_for(&self, tokens: u32, config: &RateLimitConfig) -> Duration {
        let needed = f64::from(tokens) - self.tokens;
        if needed <= 0.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(needed / config.refill_rate())
        }
    }
}

/// Rate limiter keyed by endpoint
#[derive(Debug)]
pub struct RateLimiter {
    buckets: Mutex<HashMap<String, TokenBucket>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a rate limiter where every key starts with a full bucket
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            config,
        }
    }

    fn with_bucket<R>(&self, key: &str, f: impl FnOnce(&mut TokenBucket, &RateLimitConfig) -> R) -> R {
        let mut buckets = self
            .buckets
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let bucket = buckets
            .entry(key.to_string())
            .or_insert_with(|| TokenBucket::full(&self.config));
        bucket.refill(&self.config);
        f(bucket, &self.config)
    }

    /// Take one token for `key`, if available
    #[must_use]
    pub fn try_acquire(&self, key: &str) -> bool {
        self.with_bucket(key, |bucket, _| {
            if bucket.tokens >= 1.0 {
                bucket.tokens -= 1.0;
                true
            } else {
                false
            }
        })
    }

    /// Time until one token is available for `key`
    #[must_use]
    pub fn time_until_available(&self, key: &str) -> Duration {
        self.with_bucket(key, |bucket, config| bucket.wait_for(1, config))
    }

    /// Forget the bucket for `key`
    pub fn reset(&self, key: &str) {
        self.buckets
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(key);
    }

    /// Current status for `key`
    #[must_use]
    pub fn status(&self, key: &str) -> RateLimitStatus {
        self.with_bucket(key, |bucket, config| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let available = bucket.tokens.floor() as u32;
            RateLimitStatus {
                available,
                max: config.max_requests + config.burst,
                reset_in: bucket.wait_for(config.max_requests + config.burst, config),
            }
        })
    }
}

/// Rate limit status
#[derive(Debug, Clone, Serialize)]
pub struct RateLimitStatus {
    /// Tokens available now
    pub available: u32,
    /// Bucket capacity
    pub max: u32,
    /// Time until the bucket is full again
    pub reset_in: Duration,
}
