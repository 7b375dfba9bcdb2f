// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::{CookieJar, WithRejection};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{LoginRequest, NewUser, RegisterRequest, Role, UserResponse, normalize_email},
    state::AppState,
    utils::{
        hash::{hash_password, verify_password},
        jwt::{auth_cookie, removal_cookie, sign_jwt},
        response::respond,
    },
};

/// Registers a new user.
///
/// The password is wrapped in the configured pepper and hashed with Argon2
/// before it is stored. Role defaults to `student`.
/// Returns 201 Created and the user object (excluding password).
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(mut payload), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.email = normalize_email(&payload.email);

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest(
            "All fields (email, password) are required".to_string(),
        ));
    }

    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let role = payload
        .role
        .as_deref()
        .map(str::parse::<Role>)
        .transpose()
        .map_err(AppError::BadRequest)?
        .unwrap_or_default();

    let password_hash = hash_password(&payload.password, &state.config.pepper())?;

    let user = state
        .users
        .create(NewUser {
            email: payload.email,
            password_hash,
            role,
        })
        .await?;

    Ok(respond(
        StatusCode::CREATED,
        "User registered successfully",
        UserResponse::from(&user),
    ))
}

/// Authenticates a user and sets the session cookie.
///
/// Verifies email and password, then checks that the requested role matches
/// the stored one. On success the signed JWT goes into an http-only cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    if payload.validate().is_err() {
        return Err(AppError::BadRequest(
            "Email, password and role are required".to_string(),
        ));
    }

    let user = state
        .users
        .find_by_email(&normalize_email(&payload.email))
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid email or password".to_string()))?;

    let is_valid = verify_password(&payload.password, &user.password, &state.config.pepper())?;

    if !is_valid {
        return Err(AppError::BadRequest("Invalid password".to_string()));
    }

    if payload.role.parse::<Role>().ok() != Some(user.role) {
        return Err(AppError::Forbidden("Role mismatch".to_string()));
    }

    let token = sign_jwt(&user, &state.config.jwt_secret, state.config.jwt_expiration)?;

    tracing::info!(user_id = user.id, role = %user.role, "user logged in");

    Ok((
        jar.add(auth_cookie(token, state.config.jwt_expiration)),
        respond(
            StatusCode::OK,
            "Logged in successfully",
            json!({ "user": { "role": user.role } }),
        ),
    ))
}

/// Clears the session cookie.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.remove(removal_cookie()),
        respond(StatusCode::OK, "Logged out successfully", json!({})),
    )
}
