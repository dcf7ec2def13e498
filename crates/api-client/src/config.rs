//! Configuration for the storefront API client
//!
//! Environment variables win over the `[api]` section of `.storefront.toml`,
//! which wins over the built-in defaults.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use storefront_core::config::ApiSettings;
use storefront_core::rate_limit::RateLimitConfig;
use storefront_core::retry::{CircuitBreakerConfig, RetryConfig};

/// Default production storefront URL
const DEFAULT_BASE_URL: &str = "https://atacadaoguanabara.com.br";

/// Local Next.js dev server
const DEVELOPMENT_BASE_URL: &str = "http://localhost:3000";

/// Environment types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development server
    Development,
    /// Staging deployment
    Staging,
    /// Live storefront
    #[default]
    Production,
}

impl Environment {
    /// Parse from `STOREFRONT_ENV`
    #[must_use]
    pub fn from_env() -> Self {
        Self::parse(&env::var("STOREFRONT_ENV").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }

    fn retry(self) -> RetryConfig {
        match self {
            Self::Development => RetryConfig::quick(),
            Self::Staging => RetryConfig::default(),
            Self::Production => RetryConfig::patient(),
        }
    }

    fn rate_limit(self) -> RateLimitConfig {
        match self {
            Self::Development => RateLimitConfig::per_minute(1000),
            Self::Staging => RateLimitConfig::per_minute(200),
            Self::Production => RateLimitConfig::per_minute(100),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Storefront base URL
    pub base_url: String,
    /// Optional bearer token for the admin endpoints
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Longest time a request waits for a rate-limit slot
    #[serde(with = "duration_secs")]
    pub max_rate_limit_wait: Duration,
    /// Product list path
    pub products_path: String,
    /// Best-seller list path
    pub best_sellers_path: String,
    /// Promotions path
    pub promotions_path: String,
    /// Retry configuration
    pub retry: RetryConfig,
    /// Circuit breaker configuration
    pub circuit_breaker: CircuitBreakerConfig,
    /// Rate limit configuration
    pub rate_limit: RateLimitConfig,
    /// Current environment
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl ClientConfig {
    fn for_environment(environment: Environment) -> Self {
        let settings = ApiSettings::default();
        let base_url = match environment {
            Environment::Development => DEVELOPMENT_BASE_URL,
            Environment::Staging | Environment::Production => DEFAULT_BASE_URL,
        };
        Self {
            base_url: base_url.to_string(),
            api_key: None,
            timeout: Duration::from_secs(settings.timeout_secs),
            max_rate_limit_wait: Duration::from_secs(2),
            products_path: settings.products_path,
            best_sellers_path: settings.best_sellers_path,
            promotions_path: settings.promotions_path,
            retry: environment.retry(),
            circuit_breaker: CircuitBreakerConfig::default(),
            rate_limit: environment.rate_limit(),
            environment,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads:
    /// - `STOREFRONT_API_URL`: storefront base URL
    /// - `STOREFRONT_ENV`: environment (development/staging/production)
    /// - `STOREFRONT_TIMEOUT_SECS`: request timeout in seconds
    /// - `STOREFRONT_API_KEY`: bearer token
    ///
    /// # Errors
    /// Fails when `STOREFRONT_TIMEOUT_SECS` is set but not a number.
    pub fn from_env() -> ApiResult<Self> {
        Self::from_settings(&ApiSettings::default())
    }

    /// Resolve configuration from `.storefront.toml` settings and the
    /// environment.
    ///
    /// # Errors
    /// Fails when `STOREFRONT_TIMEOUT_SECS` is set but not a number.
    pub fn from_settings(settings: &ApiSettings) -> ApiResult<Self> {
        let mut config = Self::for_environment(Environment::from_env());

        if let Some(url) = env::var("STOREFRONT_API_URL").ok().or_else(|| settings.base_url.clone()) {
            config.base_url = url;
        }

        config.timeout = match env::var("STOREFRONT_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().map(Duration::from_secs).map_err(|_| {
                ApiError::config(format!("STOREFRONT_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            Err(_) => Duration::from_secs(settings.timeout_secs),
        };

        config.api_key = env::var("STOREFRONT_API_KEY").ok().filter(|k| !k.is_empty());
        config.products_path.clone_from(&settings.products_path);
        config.best_sellers_path.clone_from(&settings.best_sellers_path);
        config.promotions_path.clone_from(&settings.promotions_path);

        Ok(config)
    }

    /// Local development server configuration
    #[must_use]
    pub fn development() -> Self {
        Self::for_environment(Environment::Development)
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the bearer token
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Builder-style method to set rate limit config
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Join a path onto the base URL
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] describing the first invalid field.
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        if self.retry.max_attempts == 0 {
            return Err(ApiError::config("retry.max_attempts must be at least 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.best_sellers_path, "api/mais-vendidos");
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_development_config() {
        let config = ClientConfig::development();
        assert!(config.base_url.contains("localhost"));
        assert_eq!(config.retry, RetryConfig::quick());
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("DEV"), Environment::Development);
        assert_eq!(Environment::parse("stage"), Environment::Staging);
        assert_eq!(Environment::parse(""), Environment::Production);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("https://staging.example.com/")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(
            config.url("/api/products"),
            "https://staging.example.com/api/products"
        );
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(ClientConfig::default().with_base_url("ftp://x").validate().is_err());
        assert!(
            ClientConfig::default()
                .with_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = ClientConfig::default().with_api_key("secret-token");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret-token"));
    }
}
