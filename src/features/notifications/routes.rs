use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::notifications::handlers;
use crate::features::notifications::services::NotificationService;

/// Create routes for the notifications feature (auth middleware applied by caller)
pub fn routes(service: Arc<NotificationService>) -> Router {
    Router::new()
        .route("/api/notifications", get(handlers::list_notifications))
        .route(
            "/api/notifications/{id}/read",
            patch(handlers::mark_notification_read),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::UserRole;
    use crate::shared::test_helpers::{with_user, InMemoryStore};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    #[tokio::test]
    async fn test_list_and_mark_read_over_http() {
        let store = InMemoryStore::new();
        let user = store.seed_user("Ana", UserRole::Citizen);
        let service = Arc::new(NotificationService::new(store.clone()));
        let created = service
            .create_notification(user.id, None, "Your report was updated")
            .await
            .unwrap();

        let server = TestServer::new(with_user(routes(service), &user)).unwrap();

        let response = server.get("/api/notifications").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["data"][0]["is_read"], false);

        let response = server
            .patch(&format!("/api/notifications/{}/read", created.id))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["is_read"], true);
    }

    #[tokio::test]
    async fn test_mark_read_of_foreign_notification_is_not_found() {
        let store = InMemoryStore::new();
        let owner = store.seed_user("Ana", UserRole::Citizen);
        let other = store.seed_user("Bo", UserRole::Citizen);
        let service = Arc::new(NotificationService::new(store.clone()));
        let created = service
            .create_notification(owner.id, None, "mine")
            .await
            .unwrap();

        let server = TestServer::new(with_user(routes(service), &other)).unwrap();
        let response = server
            .patch(&format!("/api/notifications/{}/read", created.id))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_requires_authenticated_user() {
        let store = InMemoryStore::new();
        let service = Arc::new(NotificationService::new(store.clone()));
        let server = TestServer::new(routes(service)).unwrap();

        server
            .get("/api/notifications")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
