//! Transport-level errors
//!
//! An authorization check itself never fails. Everything here is about the
//! request not reaching the authorizer: an undecodable message, a path or
//! HTTP method the service does not serve, or transport middleware giving up.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// Request body is not a valid message
    InvalidMessage(JsonRejection),

    /// No RPC method at this path (404)
    UnknownMethod(String),

    /// Path exists but not for this HTTP method (405)
    MethodNotAllowed {
        /// HTTP method used
        method: String,
        /// Request path
        path: String,
    },

    /// Request exceeded the configured timeout (408)
    Timeout,

    /// Transport middleware failed (500)
    Internal(String),
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidMessage(rejection) => {
                write!(f, "Invalid message: {}", rejection.body_text())
            }
            ApiError::UnknownMethod(path) => write!(f, "Unknown method: {}", path),
            ApiError::MethodNotAllowed { method, path } => {
                write!(f, "Method not allowed: {} {}", method, path)
            }
            ApiError::Timeout => write!(f, "Request timed out"),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidMessage(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::InvalidMessage(rejection) => {
                (rejection.status(), "invalid_message", rejection.body_text())
            }
            ApiError::UnknownMethod(path) => (
                StatusCode::NOT_FOUND,
                "unimplemented",
                format!("No method at {}", path),
            ),
            ApiError::MethodNotAllowed { method, path } => (
                StatusCode::METHOD_NOT_ALLOWED,
                "method_not_allowed",
                format!("{} is not allowed on {}", method, path),
            ),
            ApiError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "timeout",
                "Request timed out".to_string(),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::UnknownMethod("/auth.AuthService/Login".to_string());
        assert_eq!(format!("{}", err), "Unknown method: /auth.AuthService/Login");
    }

    #[test]
    fn test_api_error_display_transport_variants() {
        let err = ApiError::MethodNotAllowed {
            method: "GET".to_string(),
            path: "/metrics".to_string(),
        };
        assert_eq!(format!("{}", err), "Method not allowed: GET /metrics");
        assert_eq!(format!("{}", ApiError::Timeout), "Request timed out");
        assert_eq!(
            format!("{}", ApiError::Internal("overloaded".to_string())),
            "Internal error: overloaded"
        );
    }

    #[tokio::test]
    async fn test_api_error_into_response_timeout() {
        let response = ApiError::Timeout.into_response();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"], "timeout");
        assert_eq!(json["message"], "Request timed out");
    }

    #[tokio::test]
    async fn test_api_error_into_response_internal() {
        let response = ApiError::Internal("overloaded".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"], "internal_error");
        assert_eq!(json["message"], "overloaded");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = ApiError::UnknownMethod("/".to_string());
        let _error: &dyn std::error::Error = &err;
    }

    #[tokio::test]
    async fn test_api_error_into_response_unknown_method() {
        let err = ApiError::UnknownMethod("/auth.AuthService/Login".to_string());
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"], "unimplemented");
        assert_eq!(json["message"], "No method at /auth.AuthService/Login");
    }

    #[test]
    fn test_error_response_serialization() {
        let response = ErrorResponse {
            error: "invalid_message".to_string(),
            message: "missing field `username`".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("invalid_message"));
        assert!(json.contains("missing field"));
    }
}
