use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create admin routes (all require admin role). Nested under `/api/admin`.
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/issues", get(handlers::list_issues))
        .route("/issues/{id}/status", patch(handlers::update_issue_status))
        .route("/stats", get(handlers::get_stats))
        .with_state(admin_service)
}
