//! Response envelopes.
//!
//! Storefront routes answer either with the bare payload or with
//! `{ "success": bool, "data": ..., "error": ... }`. Both shapes decode into
//! [`Payload`], which turns into an [`ApiResult`].

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// `{ success, data, error }` wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the route handled the request
    pub success: bool,
    /// Payload on success
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Error message or object on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl<T> Envelope<T> {
    /// Convert into a result, treating `success: false` as an error.
    ///
    /// # Errors
    /// [`ApiError::Rejected`] on `success: false`, [`ApiError::MissingData`]
    /// when a successful envelope has no `data`.
    pub fn into_result(self) -> ApiResult<T> {
        if !self.success {
            return Err(ApiError::Rejected {
                message: self.error.as_ref().map_or_else(|| "unknown error".to_string(), error_message),
            });
        }
        self.data.ok_or(ApiError::MissingData)
    }
}

fn error_message(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| other.to_string(), str::to_string),
    }
}

/// Either an enveloped or a bare payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    /// Wrapped in an [`Envelope`]
    Enveloped(Envelope<T>),
    /// The payload itself
    Bare(T),
}

impl<T> Payload<T> {
    /// Unwrap into a result
    ///
    /// # Errors
    /// See [`Envelope::into_result`].
    pub fn into_result(self) -> ApiResult<T> {
        match self {
            Self::Enveloped(envelope) => envelope.into_result(),
            Self::Bare(data) => Ok(data),
        }
    }
}
