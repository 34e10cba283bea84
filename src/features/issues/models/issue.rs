use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::AppError;

/// Issue status enum matching database enum
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Type,
    ToSchema,
)]
#[sqlx(type_name = "issue_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 3] = [
        IssueStatus::Open,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Open => "OPEN",
            IssueStatus::InProgress => "IN_PROGRESS",
            IssueStatus::Resolved => "RESOLVED",
        }
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssueStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::Validation("Invalid status".to_string()))
    }
}

/// Database model for issue report
#[derive(Debug, Clone, FromRow)]
pub struct IssueReport {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub status: IssueStatus,
    pub latitude: f64,
    pub longitude: f64,
    pub likes_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Issue row joined with the reporter's display name
#[derive(Debug, Clone, FromRow)]
pub struct IssueWithReporter {
    #[sqlx(flatten)]
    pub issue: IssueReport,
    pub reporter_name: String,
}

/// Data for creating a new issue
#[derive(Debug, Clone)]
pub struct CreateIssue {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Page window plus optional status restriction
#[derive(Debug, Clone, Copy)]
pub struct IssueFilter {
    pub status: Option<IssueStatus>,
    pub offset: i64,
    pub limit: i64,
}

/// Outcome of a like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    pub liked: bool,
    pub likes_count: i32,
}

/// Number of issues holding a status
#[derive(Debug, Clone, FromRow)]
pub struct StatusCount {
    pub status: IssueStatus,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_known_values() {
        assert_eq!("OPEN".parse::<IssueStatus>().unwrap(), IssueStatus::Open);
        assert_eq!(
            "IN_PROGRESS".parse::<IssueStatus>().unwrap(),
            IssueStatus::InProgress
        );
        assert_eq!(
            "RESOLVED".parse::<IssueStatus>().unwrap(),
            IssueStatus::Resolved
        );
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        for raw in ["", "open", "CLOSED", "In_Progress", " OPEN"] {
            assert!(matches!(
                raw.parse::<IssueStatus>(),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&IssueStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        assert_eq!(IssueStatus::default(), IssueStatus::Open);
    }
}
