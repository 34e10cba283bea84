use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::notifications::models::Notification;

/// Response DTO for notification
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Issue the notification refers to, if any
    pub report_id: Option<Uuid>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponseDto {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            user_id: n.user_id,
            report_id: n.report_id,
            message: n.message,
            is_read: n.is_read,
            created_at: n.created_at,
        }
    }
}
