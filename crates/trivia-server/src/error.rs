//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};
use trivia_core::TriviaError;

/// API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Creating something that already exists.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Resource or page not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Well-formed input that cannot be processed.
    #[error("unprocessable: {0}")]
    Unprocessable(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TriviaError> for ApiError {
    fn from(err: TriviaError) -> Self {
        match err {
            TriviaError::BadRequest(msg) => ApiError::BadRequest(msg),
            TriviaError::Unprocessable(msg) => ApiError::Unprocessable(msg),
            TriviaError::NotFound(msg) => ApiError::NotFound(msg),
            TriviaError::AlreadyExists(msg) => ApiError::Forbidden(msg),
            TriviaError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed client-facing message. Details only go to the log.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad request",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "resource not found",
            ApiError::Unprocessable(_) => "unprocessable",
            ApiError::Internal(_) => "internal server error",
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let ApiError::Internal(_) = self {
            error!("Request failed: {}", self);
        } else {
            debug!("Request rejected: {}", self);
        }

        let body = ErrorResponse {
            success: false,
            error: status.as_u16(),
            message: self.message().to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::StoreError;

    #[test]
    fn test_domain_errors_map_to_statuses() {
        let cases = [
            (TriviaError::BadRequest("x".into()), 400, "bad request"),
            (TriviaError::AlreadyExists("x".into()), 403, "forbidden"),
            (TriviaError::NotFound("x".into()), 404, "resource not found"),
            (TriviaError::Unprocessable("x".into()), 422, "unprocessable"),
        ];

        for (err, status, message) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status().as_u16(), status);
            assert_eq!(api.message(), message);
        }
    }

    #[test]
    fn test_store_error_is_internal() {
        let err = TriviaError::Store(StoreError::Backend("disk full".into()));
        let api: ApiError = err.into();
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message(), "internal server error");
    }
}
