use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::issues::models::{IssueReport, IssueStatus, IssueWithReporter, LikeToggle};

const MIN_LATITUDE: f64 = -90.0;
const MAX_LATITUDE: f64 = 90.0;
const MIN_LONGITUDE: f64 = -180.0;
const MAX_LONGITUDE: f64 = 180.0;

/// Request DTO for submitting an issue.
///
/// Every field is optional at the wire level so a missing field surfaces as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateIssueDto {
    #[validate(length(max = 255, message = "Title must be at most 255 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(range(
        min = MIN_LATITUDE,
        max = MAX_LATITUDE,
        message = "Latitude must be between -90 and 90"
    ))]
    pub latitude: Option<f64>,

    #[validate(range(
        min = MIN_LONGITUDE,
        max = MAX_LONGITUDE,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: Option<f64>,

    /// Reference to an already hosted image
    pub image_url: Option<String>,
}

/// Uploaded photo attached to an issue submission
#[derive(Debug, Clone)]
pub struct IssueImage {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Multipart form for submitting an issue with a photo.
/// The handler reads the form field by field; this type only feeds OpenAPI.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadIssueDto {
    #[schema(example = "Pothole")]
    pub title: String,
    pub description: String,
    #[schema(example = 45.74)]
    pub latitude: f64,
    #[schema(example = 21.2)]
    pub longitude: f64,
    /// Photo of the issue (jpeg, png, gif or webp)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: Option<String>,
}

/// Query params for listing issues
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct IssueListQuery {
    /// Page number (1-indexed)
    #[param(minimum = 1)]
    pub page: Option<i64>,
    /// Items per page
    #[param(minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
    /// Restrict to one status (OPEN, IN_PROGRESS, RESOLVED)
    pub status: Option<String>,
}

/// Response DTO for issue report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub status: IssueStatus,
    pub latitude: f64,
    pub longitude: f64,
    pub likes_count: i32,
    /// Display name of the reporter, present on listing and detail views
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<IssueReport> for IssueResponseDto {
    fn from(i: IssueReport) -> Self {
        Self {
            id: i.id,
            user_id: i.user_id,
            title: i.title,
            description: i.description,
            image_url: i.image_url,
            status: i.status,
            latitude: i.latitude,
            longitude: i.longitude,
            likes_count: i.likes_count,
            reporter_name: None,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

impl From<IssueWithReporter> for IssueResponseDto {
    fn from(row: IssueWithReporter) -> Self {
        Self {
            reporter_name: Some(row.reporter_name),
            ..row.issue.into()
        }
    }
}

/// Response DTO for like toggle
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LikeResponseDto {
    pub liked: bool,
    pub likes_count: i32,
}

impl From<LikeToggle> for LikeResponseDto {
    fn from(t: LikeToggle) -> Self {
        Self {
            liked: t.liked,
            likes_count: t.likes_count,
        }
    }
}
