// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, health, profile, quiz},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Slack on top of the PDF cap for the other multipart parts and boundaries.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Assembles the main application router.
///
/// * Public: register, login, logout, health, quiz callback, quiz by id.
/// * Cookie-authenticated: profile, quiz creation, teacher's quiz list.
/// * Global middleware: Trace, CORS (SPA dev server, with credentials).
/// * Unknown paths and wrong methods answer with the error envelope.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:5173"),
            HeaderValue::from_static("http://127.0.0.1:5173"),
        ])
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let auth_layer = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let user_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .merge(
            Router::new()
                .route("/profile", get(profile::get_profile))
                .layer(auth_layer.clone()),
        );

    let quiz_routes = Router::new()
        .route("/submit", put(quiz::submit_questions))
        .route("/view-quiz/{quiz_id}", get(quiz::view_quiz))
        // Protected quiz routes
        .merge(
            Router::new()
                .route(
                    "/create",
                    post(quiz::create_quiz).layer(DefaultBodyLimit::max(
                        state.config.max_upload_bytes + MULTIPART_OVERHEAD,
                    )),
                )
                .route("/view-all-quiz", get(quiz::view_all_quizzes))
                .layer(auth_layer),
        );

    Router::new()
        .route("/api/v1/healthcheck", get(health::health_check))
        .nest("/api/v1/user", user_routes)
        .nest("/api/v1/quiz", quiz_routes)
        .method_not_allowed_fallback(health::method_not_allowed)
        .fallback(health::not_found)
        // Global Middleware (applied from top to bottom)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
