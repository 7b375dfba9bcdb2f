// src/handlers/profile.rs

use axum::{Extension, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    error::AppError, models::user::UserResponse, state::AppState, utils::jwt::Claims,
    utils::response::respond,
};

/// Get the current user's profile.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .users
        .find_by_id(claims.user_id()?)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(respond(
        StatusCode::OK,
        "User profile fetched successfully",
        UserResponse::from(&user),
    ))
}
