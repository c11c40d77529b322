use super::{handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    let upload_limit = app_state.config.max_upload_bytes;
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/options", get(handlers::options_handler))
        .route(
            "/plan",
            post(handlers::plan_handler).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/practice",
            post(handlers::practice_handler).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/prompts", post(handlers::prompts_handler))
        .route("/feedback", post(handlers::feedback_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
