//! Error types for the API client

use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// API returned a non-success status
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Envelope response reported `success: false`
    #[error("Request rejected: {message}")]
    Rejected {
        /// Error carried by the envelope
        message: String,
    },

    /// Envelope response reported success without data
    #[error("Response carried no data")]
    MissingData,

    /// Circuit breaker is open
    #[error("Circuit breaker is open - storefront temporarily unavailable")]
    CircuitOpen,

    /// Rate limited
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// All retry attempts exhausted
    #[error("All {attempts} retry attempts failed: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        last_error: String,
    },

    /// A response arrived after a newer one was already applied
    #[error("Stale response (generation {ticket}, newest applied {newest})")]
    StaleResponse {
        /// Generation of the rejected response
        ticket: u64,
        /// Newest generation already applied
        newest: u64,
    },
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            // 5xx and 429
            Self::ApiResponse { status, .. } => *status >= 500 || *status == 429,
            Self::Config(_)
            | Self::Json(_)
            | Self::Rejected { .. }
            | Self::MissingData
            | Self::CircuitOpen
            | Self::RateLimited
            | Self::RetriesExhausted { .. }
            | Self::StaleResponse { .. } => false,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }
}

impl From<ApiError> for storefront_core::Error {
    fn from(err: ApiError) -> Self {
        use storefront_core::ErrorCode;

        let code = match &err {
            ApiError::Config(_) => ErrorCode::ConfigError,
            ApiError::Json(_) | ApiError::Rejected { .. } | ApiError::MissingData => {
                ErrorCode::InvalidPayload
            }
            ApiError::CircuitOpen => ErrorCode::ServiceUnavailable,
            ApiError::RateLimited => ErrorCode::RateLimited,
            ApiError::StaleResponse { .. } => ErrorCode::StaleResponse,
            ApiError::Request(_) | ApiError::ApiResponse { .. } | ApiError::RetriesExhausted { .. } => {
                ErrorCode::NetworkError
            }
        };
        storefront_core::Error::new(code, err.to_string()).with_source(err)
    }
}
