//! API error types.
//!
//! This module provides error types for the API layer including:
//! - Tenant-only routes requested from a non-tenant host
//! - Validation and slug conflict errors from onboarding
//! - Directory outages

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use workdoc_tenancy::DirectoryError;

/// API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request / validation error
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Conflict (e.g., slug already taken)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Service unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ApiError {
    /// Error returned by tenant-only routes when the host is not a tenant portal.
    #[must_use]
    pub fn tenant_not_found() -> Self {
        Self::NotFound("Company not found".to_string())
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Returns the error code string.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::SlugTaken { .. } => Self::Conflict(err.to_string()),
            DirectoryError::InvalidSlug { .. } | DirectoryError::Validation { .. } => {
                Self::BadRequest(err.to_string())
            }
            DirectoryError::NotFound { .. } => Self::NotFound(err.to_string()),
            DirectoryError::Unavailable { .. } => Self::ServiceUnavailable(err.to_string()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error status
    pub status: &'static str,
    /// Error code
    pub code: &'static str,
    /// Error message
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            status: "error",
            code: self.error_code(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::NotFound("test".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("test".to_string()).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::tenant_not_found().error_code(), "NOT_FOUND");
        assert_eq!(
            ApiError::Internal("test".to_string()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_from_directory_error() {
        let cases = [
            (DirectoryError::slug_taken("acme"), StatusCode::CONFLICT),
            (
                DirectoryError::invalid_slug("", "empty"),
                StatusCode::BAD_REQUEST,
            ),
            (
                DirectoryError::validation("primary_color", "bad"),
                StatusCode::BAD_REQUEST,
            ),
            (DirectoryError::not_found("id"), StatusCode::NOT_FOUND),
            (
                DirectoryError::unavailable("down"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::tenant_not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
