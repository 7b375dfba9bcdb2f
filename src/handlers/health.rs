// src/handlers/health.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::{error::AppError, state::AppState, utils::response::respond};

/// Liveness probe. Queue depth is `null` when the queue cannot be reached.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let queue_length = state
        .queue
        .len()
        .await
        .inspect_err(|e| tracing::warn!("Health check could not read queue length: {}", e))
        .ok();

    respond(
        StatusCode::OK,
        "Health check passed",
        json!({
            "uptime": state.started_at.elapsed().as_secs_f64(),
            "message": "Service is healthy",
            "queueLength": queue_length,
        }),
    )
}

/// Fallback for unknown routes, rendered with the error envelope.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Fallback for known routes called with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("Method not allowed".to_string())
}
