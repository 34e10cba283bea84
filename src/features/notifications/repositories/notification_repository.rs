use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::notifications::models::{NewNotification, Notification};

/// Per-user notification storage
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: NewNotification) -> Result<Notification>;

    /// Newest first
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>>;

    /// Set the read flag on a notification addressed to `user_id`.
    /// Returns `None` when no such notification exists for that recipient.
    async fn mark_as_read(&self, id: Uuid, user_id: Uuid) -> Result<Option<Notification>>;
}

pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn create(&self, notification: NewNotification) -> Result<Notification> {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, report_id, message)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, report_id, message, is_read, created_at
            "#,
        )
        .bind(notification.user_id)
        .bind(notification.report_id)
        .bind(&notification.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create notification: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, report_id, message, is_read, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list notifications: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn mark_as_read(&self, id: Uuid, user_id: Uuid) -> Result<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, report_id, message, is_read, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to mark notification as read: {:?}", e);
            AppError::Database(e)
        })
    }
}
