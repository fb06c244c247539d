//! Error types for the cache layer
//!
//! Every backend reports failures through the same four kinds so callers never
//! need to know which backend they are talking to.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type shared by all cache backends.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key or stream absent, or key expired. The two cases are not distinguished.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Stream exists but holds no retrievable entries
    #[error("Stream is empty: {0}")]
    EmptyStream(String),

    /// Capacity or maxlen out of range, or a required field was empty
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Underlying store unreachable or returned a protocol-level failure
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::EmptyStream(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CacheError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (CacheError::NotFound("k".into()), StatusCode::NOT_FOUND),
            (CacheError::EmptyStream("s".into()), StatusCode::NOT_FOUND),
            (CacheError::InvalidArgument("x".into()), StatusCode::BAD_REQUEST),
            (
                CacheError::BackendUnavailable("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_message_carries_context() {
        let err = CacheError::NotFound("session:42".to_string());
        assert_eq!(err.to_string(), "Not found: session:42");
    }
}
