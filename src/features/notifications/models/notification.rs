use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for notification
#[derive(Debug, Clone, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub report_id: Option<Uuid>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new notification
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub report_id: Option<Uuid>,
    pub message: String,
}
