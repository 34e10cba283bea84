use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{AdminIssueQuery, StatusCountDto};
use crate::features::issues::dtos::IssueResponseDto;
use crate::features::issues::models::{IssueFilter, IssueReport, IssueStatus};
use crate::features::issues::IssueRepository;
use crate::features::notifications::NotificationService;
use crate::shared::constants::ADMIN_DEFAULT_PAGE_SIZE;
use crate::shared::side_effects::best_effort;
use crate::shared::types::PageRequest;

/// Service for admin triage of issues
pub struct AdminService {
    issues: Arc<dyn IssueRepository>,
    notifications: Arc<NotificationService>,
}

impl AdminService {
    pub fn new(issues: Arc<dyn IssueRepository>, notifications: Arc<NotificationService>) -> Self {
        Self {
            issues,
            notifications,
        }
    }

    /// Page through all issues with reporter names, newest first
    pub async fn list_issues(
        &self,
        query: AdminIssueQuery,
    ) -> Result<(Vec<IssueResponseDto>, PageRequest)> {
        let status = query
            .status
            .as_deref()
            .map(str::parse::<IssueStatus>)
            .transpose()?;
        let page = PageRequest::new(query.page, query.limit, ADMIN_DEFAULT_PAGE_SIZE);

        let rows = self
            .issues
            .list(IssueFilter {
                status,
                offset: page.offset(),
                limit: page.limit,
            })
            .await?;

        Ok((rows.into_iter().map(Into::into).collect(), page))
    }

    /// Change an issue's status and tell its reporter.
    ///
    /// The status is checked before anything is written. The reporter
    /// notification is best-effort; the status change stands either way.
    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<IssueResponseDto> {
        let status: IssueStatus = status.parse()?;

        let issue = self
            .issues
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Issue not found".to_string()))?;

        tracing::info!("Issue status updated: id={}, status={}", issue.id, issue.status);

        self.notify_reporter(&issue).await;

        Ok(issue.into())
    }

    /// Issue counts per status. Statuses with no issues are left out.
    pub async fn get_stats(&self) -> Result<Vec<StatusCountDto>> {
        let counts = self.issues.count_by_status().await?;
        Ok(counts.into_iter().map(Into::into).collect())
    }

    async fn notify_reporter(&self, issue: &IssueReport) {
        let message = format!(
            "Your report \"{}\" status has been updated to {}.",
            issue.title, issue.status
        );

        best_effort(
            "notify reporter of status change",
            self.notifications
                .create_notification(issue.user_id, Some(issue.id), message),
        )
        .await;
    }
}
