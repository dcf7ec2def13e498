//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{BestSellersApi, ProductsApi, PromotionsApi};
use crate::envelope::Payload;
use crate::error::{ApiError, ApiResult};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use storefront_core::rate_limit::RateLimiter;
use storefront_core::retry::{CircuitBreaker, CircuitState};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Storefront API client with built-in resilience patterns
///
/// Wraps `reqwest` and adds:
/// - Automatic retry with exponential backoff
/// - Circuit breaker to stop hammering a failing storefront
/// - Per-endpoint rate limiting
/// - Request correlation IDs for tracing
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Client,
    config: Arc<ClientConfig>,
    circuit_breaker: Arc<CircuitBreaker>,
    rate_limiter: Arc<RateLimiter>,
}

impl StorefrontClient {
    /// Create a new client with configuration from the environment
    ///
    /// # Errors
    /// Fails on invalid configuration or when the HTTP client cannot be built.
    pub fn new() -> ApiResult<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a new client with specific configuration
    ///
    /// # Errors
    /// Fails on invalid configuration or when the HTTP client cannot be built.
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("storefront-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| ApiError::config("STOREFRONT_API_KEY contains invalid characters"))?;
            default_headers.insert(AUTHORIZATION, value);
        }

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        let circuit_breaker = Arc::new(CircuitBreaker::new(config.circuit_breaker.clone()));
        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));

        Ok(Self {
            inner,
            config: Arc::new(config),
            circuit_breaker,
            rate_limiter,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get circuit breaker state
    #[must_use]
    pub fn circuit_state(&self) -> CircuitState {
        self.circuit_breaker.state()
    }

    /// Reset the circuit breaker
    pub fn reset_circuit(&self) {
        self.circuit_breaker.reset();
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Product list endpoint
    #[must_use]
    pub fn products(&self) -> ProductsApi {
        ProductsApi::new(self.clone())
    }

    /// Best-seller list endpoint
    #[must_use]
    pub fn best_sellers(&self) -> BestSellersApi {
        BestSellersApi::new(self.clone())
    }

    /// Promotions endpoint
    #[must_use]
    pub fn promotions(&self) -> PromotionsApi {
        PromotionsApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods with resilience
    // -------------------------------------------------------------------------

    /// GET a path and decode a bare or enveloped payload
    ///
    /// # Errors
    /// Network, status, decoding and envelope errors; see [`ApiError`].
    #[instrument(skip(self), fields(request_id))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let payload: Payload<T> = self.get_raw(path).await?;
        payload.into_result()
    }

    /// GET a path with full resilience patterns, decoding the body as `T`
    async fn get_raw<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.config.url(path);
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        if !self.circuit_breaker.can_execute() {
            warn!(request_id = %request_id, url = %url, "Circuit breaker is open, rejecting request");
            return Err(ApiError::CircuitOpen);
        }

        self.acquire_slot(&request_id, path).await?;
        self.execute_with_retry(&request_id, &url).await
    }

    /// Wait for a rate-limit token, up to the configured maximum
    async fn acquire_slot(&self, request_id: &str, key: &str) -> ApiResult<()> {
        if self.rate_limiter.try_acquire(key) {
            return Ok(());
        }

        let wait = self.rate_limiter.time_until_available(key);
        if wait > self.config.max_rate_limit_wait {
            warn!(request_id = %request_id, key, wait_ms = wait.as_millis(), "Rate limited");
            return Err(ApiError::RateLimited);
        }

        debug!(request_id = %request_id, key, wait_ms = wait.as_millis(), "Waiting for rate limit");
        tokio::time::sleep(wait).await;
        if self.rate_limiter.try_acquire(key) {
            Ok(())
        } else {
            Err(ApiError::RateLimited)
        }
    }

    /// Execute request with retry logic
    async fn execute_with_retry<T: DeserializeOwned>(&self, request_id: &str, url: &str) -> ApiResult<T> {
        let retry_config = &self.config.retry;
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..retry_config.max_attempts {
            if attempt > 0 {
                let delay = retry_config.delay_for_attempt(attempt);
                debug!(
                    request_id = %request_id,
                    attempt,
                    delay_ms = delay.as_millis(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();
            let result = self.execute_single_request(request_id, url).await;
            let elapsed = start.elapsed();

            match result {
                Ok(value) => {
                    self.circuit_breaker.record_success();
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        elapsed_ms = elapsed.as_millis(),
                        "Request succeeded"
                    );
                    return Ok(value);
                }
                Err(e) => {
                    self.circuit_breaker.record_failure();

                    if e.is_retryable() && attempt + 1 < retry_config.max_attempts {
                        debug!(request_id = %request_id, attempt = attempt + 1, error = %e, "Request failed, will retry");
                        last_error = Some(e);
                    } else {
                        debug!(request_id = %request_id, attempt = attempt + 1, error = %e, "Request failed, not retrying");
                        return Err(e);
                    }
                }
            }
        }

        Err(ApiError::RetriesExhausted {
            attempts: retry_config.max_attempts,
            last_error: last_error.map_or_else(|| "Unknown error".to_string(), |e| e.to_string()),
        })
    }

    /// Execute a single request without retry
    async fn execute_single_request<T: DeserializeOwned>(&self, request_id: &str, url: &str) -> ApiResult<T> {
        let response = self
            .inner
            .get(url)
            .header(X_REQUEST_ID, request_id)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Handle HTTP response and deserialize
    async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ApiError::api_response(status.as_u16(), message))
        }
    }
}
