use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::admin::dtos::{AdminIssueQuery, StatusCountDto, UpdateIssueStatusDto};
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::features::issues::dtos::IssueResponseDto;
use crate::shared::types::ApiResponse;

/// List all issues with reporter names (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/issues",
    params(AdminIssueQuery),
    responses(
        (status = 200, description = "Page of issues", body = ApiResponse<Vec<IssueResponseDto>>),
        (status = 400, description = "Invalid status filter"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_issues(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Query(query): Query<AdminIssueQuery>,
) -> Result<Json<ApiResponse<Vec<IssueResponseDto>>>> {
    let (issues, page) = service.list_issues(query).await?;

    Ok(Json(ApiResponse::success(
        Some(issues),
        None,
        Some(page.meta()),
    )))
}

/// Change an issue's status
#[utoipa::path(
    patch,
    path = "/api/admin/issues/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Issue ID")
    ),
    request_body = UpdateIssueStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<IssueResponseDto>),
        (status = 400, description = "Invalid status"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Issue not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_issue_status(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateIssueStatusDto>,
) -> Result<Json<ApiResponse<IssueResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    tracing::debug!("Admin {} setting issue {} to {}", admin.id, id, dto.status);

    let issue = service.update_status(id, &dto.status).await?;
    Ok(Json(ApiResponse::success(Some(issue), None, None)))
}

/// Issue counts per status
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Counts for statuses that have issues", body = ApiResponse<Vec<StatusCountDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_stats(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<Vec<StatusCountDto>>>> {
    let stats = service.get_stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}
