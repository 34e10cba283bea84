use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::issues::dtos::{
    CreateIssueDto, IssueListQuery, IssueResponseDto, LikeResponseDto, UploadIssueDto,
};
use crate::features::issues::handlers::IssueSubmission;
use crate::features::issues::services::IssueService;
use crate::shared::types::ApiResponse;

/// List issues, newest first
#[utoipa::path(
    get,
    path = "/api/issues",
    params(IssueListQuery),
    responses(
        (status = 200, description = "Page of issues", body = ApiResponse<Vec<IssueResponseDto>>),
        (status = 400, description = "Invalid status filter")
    ),
    tag = "issues"
)]
pub async fn list_issues(
    State(service): State<Arc<IssueService>>,
    Query(query): Query<IssueListQuery>,
) -> Result<Json<ApiResponse<Vec<IssueResponseDto>>>> {
    let (issues, page) = service.get_issues(query).await?;
    Ok(Json(ApiResponse::success(Some(issues), None, Some(page.meta()))))
}

/// Get a single issue
#[utoipa::path(
    get,
    path = "/api/issues/{id}",
    params(
        ("id" = Uuid, Path, description = "Issue ID")
    ),
    responses(
        (status = 200, description = "Issue found", body = ApiResponse<IssueResponseDto>),
        (status = 404, description = "Issue not found")
    ),
    tag = "issues"
)]
pub async fn get_issue(
    State(service): State<Arc<IssueService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<IssueResponseDto>>> {
    let issue = service.get_issue_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(issue), None, None)))
}

/// List issues reported by the caller
#[utoipa::path(
    get,
    path = "/api/issues/my-issues",
    responses(
        (status = 200, description = "Caller's issues, newest first", body = ApiResponse<Vec<IssueResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "issues"
)]
pub async fn my_issues(
    user: AuthenticatedUser,
    State(service): State<Arc<IssueService>>,
) -> Result<Json<ApiResponse<Vec<IssueResponseDto>>>> {
    let issues = service.get_user_issues(user.id).await?;
    Ok(Json(ApiResponse::success(Some(issues), None, None)))
}

/// Report a new issue
///
/// Accepts either a JSON body or multipart/form-data with an optional
/// `image` file.
#[utoipa::path(
    post,
    path = "/api/issues",
    request_body(
        content(
            (CreateIssueDto = "application/json"),
            (UploadIssueDto = "multipart/form-data")
        ),
        description = "Issue details, optionally with a photo"
    ),
    responses(
        (status = 201, description = "Issue created", body = ApiResponse<IssueResponseDto>),
        (status = 400, description = "Missing fields or invalid image"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "issues"
)]
pub async fn create_issue(
    user: AuthenticatedUser,
    State(service): State<Arc<IssueService>>,
    submission: IssueSubmission,
) -> Result<(StatusCode, Json<ApiResponse<IssueResponseDto>>)> {
    let issue = service
        .create_issue(&user, submission.dto, submission.image)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(issue), None, None)),
    ))
}

/// Like or unlike an issue
#[utoipa::path(
    post,
    path = "/api/issues/{id}/like",
    params(
        ("id" = Uuid, Path, description = "Issue ID")
    ),
    responses(
        (status = 200, description = "Like toggled", body = ApiResponse<LikeResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Issue not found")
    ),
    security(("bearer_auth" = [])),
    tag = "issues"
)]
pub async fn toggle_like(
    user: AuthenticatedUser,
    State(service): State<Arc<IssueService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<LikeResponseDto>>> {
    let like = service.toggle_like(user.id, id).await?;
    Ok(Json(ApiResponse::success(Some(like), None, None)))
}
