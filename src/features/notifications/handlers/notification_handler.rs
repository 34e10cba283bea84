use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::notifications::dtos::NotificationResponseDto;
use crate::features::notifications::services::NotificationService;
use crate::shared::types::ApiResponse;

/// List the caller's notifications, newest first
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Notifications for the current user", body = ApiResponse<Vec<NotificationResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn list_notifications(
    user: AuthenticatedUser,
    State(service): State<Arc<NotificationService>>,
) -> Result<Json<ApiResponse<Vec<NotificationResponseDto>>>> {
    let notifications = service.get_user_notifications(user.id).await?;
    Ok(Json(ApiResponse::success(Some(notifications), None, None)))
}

/// Mark one of the caller's notifications as read
#[utoipa::path(
    patch,
    path = "/api/notifications/{id}/read",
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked as read", body = ApiResponse<NotificationResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Notification not found")
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn mark_notification_read(
    user: AuthenticatedUser,
    State(service): State<Arc<NotificationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<NotificationResponseDto>>> {
    let notification = service.mark_as_read(id, user.id).await?;
    Ok(Json(ApiResponse::success(Some(notification), None, None)))
}
