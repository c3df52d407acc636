pub mod applications;
pub mod blog;
pub mod companies;
pub mod contact;
pub mod health;
pub mod jobs;
pub mod logging;

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;

use crate::applications::multipart::MAX_FILE_BYTES;
use crate::state::AppState;

/// Seven files at the per-file cap plus headroom for text fields.
pub const MAX_REQUEST_BYTES: usize = 7 * MAX_FILE_BYTES + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs
        .route("/api/jobs", get(jobs::handle_list_jobs))
        .route("/api/jobs/featured", get(jobs::handle_featured_jobs))
        .route("/api/jobs/:id", get(jobs::handle_get_job))
        .route("/api/jobs/:id/apply", post(applications::handle_apply))
        // Blog
        .route("/api/blog", get(blog::handle_list_posts))
        .route("/api/blog/:slug", get(blog::handle_get_post))
        // Companies & contact
        .route("/api/companies", get(companies::handle_list_companies))
        .route("/api/contact", post(contact::handle_create_message))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(middleware::from_fn(logging::log_api_requests))
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Not Found" })),
    )
        .into_response()
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!("Handler panicked: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Internal Server Error" })),
    )
        .into_response()
}
