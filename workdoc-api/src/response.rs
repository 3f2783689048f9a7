//! API response types.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

/// Standard API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    /// Response status
    pub status: &'static str,
    /// Response data
    pub data: T,
    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response with data.
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
            message: None,
        }
    }

    /// Creates a successful response with data and message.
    #[must_use]
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            status: "success",
            data,
            message: Some(message.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Created response (HTTP 201).
#[derive(Debug, Serialize)]
pub struct CreatedResponse<T>
where
    T: Serialize,
{
    /// Response status
    pub status: &'static str,
    /// Created resource
    pub data: T,
    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> CreatedResponse<T> {
    /// Creates a new created response with a message.
    #[must_use]
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            status: "success",
            data,
            message: Some(message.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for CreatedResponse<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}
