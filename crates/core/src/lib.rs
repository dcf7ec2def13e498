//! Core utilities for the storefront tools
//!
//! Shared functionality used by the search CLI and the API client:
//!
//! - **Error handling**: errors with numeric codes, context and recovery suggestions
//! - **Configuration**: `.storefront.toml` loading with serde defaults and validation
//! - **Retry**: exponential backoff policy and a circuit breaker
//! - **Rate limiting**: per-key token buckets
//!
//! # Example
//!
//! ```rust,no_run
//! use storefront_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("default page size: {}", config.schema.pagination.default_page_size);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod retry;

pub use error::{Error, ErrorCode, ErrorReport, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, StorefrontConfig};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::rate_limit::{RateLimitConfig, RateLimiter};
    pub use crate::retry::{CircuitBreaker, CircuitBreakerConfig, CircuitState, RetryConfig};
}
