use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::notifications::dtos::NotificationResponseDto;
use crate::features::notifications::models::{NewNotification, Notification};
use crate::features::notifications::repositories::NotificationRepository;

/// Service for per-user notifications
pub struct NotificationService {
    repository: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self { repository }
    }

    /// Store a notification for `user_id`, optionally pointing at an issue
    pub async fn create_notification(
        &self,
        user_id: Uuid,
        report_id: Option<Uuid>,
        message: impl Into<String>,
    ) -> Result<Notification> {
        let notification = self
            .repository
            .create(NewNotification {
                user_id,
                report_id,
                message: message.into(),
            })
            .await?;

        tracing::debug!(
            "Notification created: id={}, user_id={}, report_id={:?}",
            notification.id,
            notification.user_id,
            notification.report_id
        );

        Ok(notification)
    }

    pub async fn get_user_notifications(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<NotificationResponseDto>> {
        let notifications = self.repository.list_by_user(user_id).await?;
        Ok(notifications.into_iter().map(Into::into).collect())
    }

    /// Mark a notification as read. Only the recipient may do this; anything
    /// else looks exactly like a missing notification.
    pub async fn mark_as_read(&self, id: Uuid, user_id: Uuid) -> Result<NotificationResponseDto> {
        self.repository
            .mark_as_read(id, user_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Notification {} not found", id)))
    }
}
