use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::issues::models::{IssueStatus, StatusCount};

/// Query params for the admin issue table
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct AdminIssueQuery {
    /// Page number (1-indexed)
    #[param(minimum = 1)]
    pub page: Option<i64>,
    /// Items per page (default 50)
    #[param(minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
    /// Restrict to one status (OPEN, IN_PROGRESS, RESOLVED)
    pub status: Option<String>,
}

/// Request DTO for changing an issue's status
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateIssueStatusDto {
    /// One of OPEN, IN_PROGRESS, RESOLVED
    #[serde(default)]
    #[validate(length(min = 1, message = "Status is required"))]
    #[schema(example = "IN_PROGRESS")]
    pub status: String,
}

/// Number of issues in one status
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusCountDto {
    pub status: IssueStatus,
    pub count: i64,
}

impl From<StatusCount> for StatusCountDto {
    fn from(c: StatusCount) -> Self {
        Self {
            status: c.status,
            count: c.count,
        }
    }
}
