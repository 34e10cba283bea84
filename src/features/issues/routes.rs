use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::issues::handlers;
use crate::features::issues::services::IssueService;

/// Room for the text fields sent next to the image
const FORM_OVERHEAD: usize = 64 * 1024;

/// Browsing routes, no authentication
pub fn public_routes(service: Arc<IssueService>) -> Router {
    Router::new()
        .route("/api/issues", get(handlers::list_issues))
        .route("/api/issues/{id}", get(handlers::get_issue))
        .with_state(service)
}

/// Routes for signed-in users (auth middleware applied by caller)
pub fn protected_routes(service: Arc<IssueService>) -> Router {
    let upload_limit = service.max_image_size() + FORM_OVERHEAD;

    Router::new()
        .route(
            "/api/issues",
            post(handlers::create_issue).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/issues/my-issues", get(handlers::my_issues))
        .route("/api/issues/{id}/like", post(handlers::toggle_like))
        .with_state(service)
}
