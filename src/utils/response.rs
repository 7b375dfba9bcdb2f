// src/utils/response.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Success envelope shared by every handler.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub message: String,
    pub data: T,
    pub timestamp: DateTime<Utc>,
}

/// Error envelope. `status` is "fail" for 4xx and "error" for 5xx.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data,
            timestamp: Utc::now(),
        }
    }
}

impl ErrorResponse {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status_label(code),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

fn status_label(code: StatusCode) -> &'static str {
    if code.is_client_error() { "fail" } else { "error" }
}

/// Builds a success response with the given HTTP status.
pub fn respond<T: Serialize>(code: StatusCode, message: impl Into<String>, data: T) -> Response {
    (code, Json(ApiResponse::success(message, data))).into_response()
}
