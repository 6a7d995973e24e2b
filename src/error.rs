//! Error types for the cache and its HTTP front-end
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Config Error Enum ==
/// Invalid construction parameters.
///
/// Only constructors return this; no cache operation fails once built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Capacity must be at least one entry
    #[error("Invalid capacity {0}: must be greater than zero")]
    InvalidCapacity(usize),

    /// Snowflake worker ids must fit in 10 bits
    #[error("Invalid worker id {0}: must be at most {max}", max = crate::id::MAX_WORKER_ID)]
    InvalidWorkerId(u16),
}

// == API Error Enum ==
/// Errors surfaced by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Key not found in cache, or expired
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Value refused by the entry size limit
    #[error("Value too large for key: {0}")]
    ValueTooLarge(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValueTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        assert!(ConfigError::InvalidCapacity(0)
            .to_string()
            .contains("capacity"));
        assert!(ConfigError::InvalidWorkerId(2000)
            .to_string()
            .contains("1023"));
    }

    #[test]
    fn test_api_error_status_codes() {
        let cases = [
            (ApiError::NotFound("k".into()), StatusCode::NOT_FOUND),
            (ApiError::InvalidRequest("k".into()), StatusCode::BAD_REQUEST),
            (ApiError::ValueTooLarge("k".into()), StatusCode::PAYLOAD_TOO_LARGE),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
