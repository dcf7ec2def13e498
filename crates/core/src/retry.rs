//! Retry policy and circuit breaker
//!
//! Used by the API client around every storefront request:
//! - Exponential backoff with jitter between attempts
//! - A circuit breaker that stops calling a failing backend for a while
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use storefront_core::retry::RetryConfig;
//!
//! let policy = RetryConfig { jitter: false, ..RetryConfig::default() };
//! assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(200));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts, the first one included
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for any delay
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Add up to 25% random jitter to delays
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Short delays, for local development
    #[must_use]
    pub fn quick() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(50),
            max_delay: Duration::from_millis(500),
            ..Self::default()
        }
    }

    /// More attempts and longer delays, for production
    #[must_use]
    pub fn patient() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            ..Self::default()
        }
    }

    /// Delay to wait before attempt number `attempt` (0 is the first try).
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let base = self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        let capped = base.min(self.max_delay.as_secs_f64());

        let secs = if self.jitter {
            capped * (1.0 + jitter_fraction(attempt) * 0.25)
        } else {
            capped
        };

        Duration::from_secs_f64(secs)
    }
}

/// Pseudo-random value in `[0, 1)`, freshly seeded per call
fn jitter_fraction(attempt: u32) -> f64 {
    let hash = RandomState::new().hash_one(attempt);
    #[allow(clippy::cast_precision_loss)]
    let fraction = (hash % 1000) as f64 / 1000.0;
    fraction
}

/// Circuit breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitState {
    /// Requests flow normally
    Closed,
    /// Requests are rejected until the reset timeout passes
    Open,
    /// A trial request is allowed through
    HalfOpen,
}

/// Circuit breaker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before opening the circuit
    pub failure_threshold: u32,
    /// Successes in half-open needed to close the circuit
    pub success_threshold: u32,
    /// Time to wait before trying half-open
    pub reset_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            success_threshold: 2,
            reset_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    opened_at: Option<Instant>,
}

/// Circuit breaker for preventing cascading failures
#[derive(Debug)]
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    inner: Mutex<BreakerInner>,
    failure_count: AtomicU32,
    success_count: AtomicU32,
}

impl CircuitBreaker {
    /// Create a closed circuit breaker
    #[must_use]
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                opened_at: None,
            }),
            failure_count: AtomicU32::new(0),
            success_count: AtomicU32::new(0),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BreakerInner> {
        // State stays consistent even if a holder panicked
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Get current state
    #[must_use]
    pub fn state(&self) -> CircuitState {
        self.lock().state
    }

    /// Whether a request may go out now.
    ///
    /// An open circuit moves to half-open once the reset timeout elapsed.
    #[must_use]
    pub fn can_execute(&self) -> bool {
        let mut inner = self.lock();
        match inner.state {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                let elapsed = inner.opened_at.map_or(Duration::MAX, |at| at.elapsed());
                if elapsed >= self.config.reset_timeout {
                    inner.state = CircuitState::HalfOpen;
                    self.success_count.store(0, Ordering::Relaxed);
                    tracing::debug!("circuit half-open");
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Record a successful request
    pub fn record_success(&self) {
        self.failure_count.store(0, Ordering::Relaxed);

        let mut inner = self.lock();
        if inner.state == CircuitState::HalfOpen {
            let successes = self.success_count.fetch_add(1, Ordering::Relaxed) + 1;
            if successes >= self.config.success_threshold {
                inner.state = CircuitState::Closed;
                inner.opened_at = None;
                tracing::debug!("circuit closed");
            }
        }
    }

    /// Record a failed request
    pub fn record_failure(&self) {
        let failures = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;

        let mut inner = self.lock();
        let trip = match inner.state {
            CircuitState::Closed => failures >= self.config.failure_threshold,
            CircuitState::HalfOpen => true,
            CircuitState::Open => false,
        };
        if trip {
            inner.state = CircuitState::Open;
            inner.opened_at = Some(Instant::now());
            tracing::warn!(failures, "circuit opened");
        }
    }

    /// Close the circuit and clear counters
    pub fn reset(&self) {
        self.failure_count.store(0, Ordering::Relaxed);
        self.success_count.store(0, Ordering::Relaxed);
        let mut inner = self.lock();
        inner.state = CircuitState::Closed;
        inner.opened_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_calculation() {
        let config = RetryConfig {
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter: false,
            ..Default::default()
        };

        assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(config.delay_for_attempt(3), Duration::from_millis(400));
    }

    #[test]
    fn test_delay_is_capped() {
        let config = RetryConfig {
            max_delay: Duration::from_millis(300),
            jitter: false,
            ..Default::default()
        };
        assert_eq!(config.delay_for_attempt(10), Duration::from_millis(300));
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let config = RetryConfig::default();
        for _ in 0..50 {
            let delay = config.delay_for_attempt(1);
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_millis(125));
        }
    }

    #[test]
    fn test_circuit_breaker_closed() {
        let cb = CircuitBreaker::new(CircuitBreakerConfig::default());
        assert_eq!(cb.state(), CircuitState::Closed);
        assert!(cb.can_execute());
    }

    #[test]
    fn test_circuit_breaker_opens_on_failures() {
        let cb = CircuitBreaker::new(CircuitBreakerConfig {
            failure_threshold: 2,
            ..Default::default()
        });

        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Closed);

        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Open);
        assert!(!cb.can_execute());
    }

    #[test]
    fn test_half_open_after_timeout() {
        let cb = CircuitBreaker::new(CircuitBreakerConfig {
            failure_threshold: 1,
            success_threshold: 1,
            reset_timeout: Duration::ZERO,
        });

        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Open);
        assert!(cb.can_execute());
        assert_eq!(cb.state(), CircuitState::HalfOpen);

        cb.record_success();
        assert_eq!(cb.state(), CircuitState::Closed);
    }

    #[test]
    fn test_half_open_failure_reopens() {
        let cb = CircuitBreaker::new(CircuitBreakerConfig {
            failure_threshold: 3,
            success_threshold: 1,
            reset_timeout: Duration::ZERO,
        });
        for _ in 0..3 {
            cb.record_failure();
        }
        assert!(cb.can_execute());
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Open);
    }

    #[test]
    fn test_circuit_breaker_reset() {
        let cb = CircuitBreaker::new(CircuitBreakerConfig {
            failure_threshold: 1,
            ..Default::default()
        });

        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Open);

        cb.reset();
        assert_eq!(cb.state(), CircuitState::Closed);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_delay_is_bounded(attempt in 1u32..64, initial_ms in 1u64..2_000, max_ms in 1u64..60_000) {
                let config = RetryConfig {
                    initial_delay: Duration::from_millis(initial_ms),
                    max_delay: Duration::from_millis(max_ms),
                    jitter: true,
                    ..Default::default()
                };
                let delay = config.delay_for_attempt(attempt).as_secs_f64();
                prop_assert!(delay <= Duration::from_millis(max_ms).as_secs_f64() * 1.25 + 1e-9);
            }

            #[test]
            fn prop_delay_never_shrinks_without_jitter(attempt in 1u32..32) {
                let config = RetryConfig { jitter: false, ..RetryConfig::quick() };
                prop_assert!(config.delay_for_attempt(attempt + 1) >= config.delay_for_attempt(attempt));
            }
        }
    }
}
