use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::issues::models::{
    CreateIssue, IssueFilter, IssueReport, IssueStatus, IssueWithReporter, LikeToggle,
    StatusCount,
};

/// Issue report and like storage
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Insert a new issue with status OPEN and zero likes
    async fn create(&self, issue: CreateIssue) -> Result<IssueReport>;

    /// Newest first, restricted by the filter's status and window
    async fn list(&self, filter: IssueFilter) -> Result<Vec<IssueWithReporter>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<IssueWithReporter>>;

    /// Newest first
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<IssueReport>>;

    /// Set status and bump `updated_at`. `None` if the issue does not exist.
    async fn update_status(&self, id: Uuid, status: IssueStatus) -> Result<Option<IssueReport>>;

    /// Flip the (user, issue) like and adjust `likes_count` atomically.
    /// `None` if the issue does not exist.
    async fn toggle_like(&self, user_id: Uuid, issue_id: Uuid) -> Result<Option<LikeToggle>>;

    /// One row per status present, in status order
    async fn count_by_status(&self) -> Result<Vec<StatusCount>>;
}

pub struct PgIssueRepository {
    pool: PgPool,
}

impl PgIssueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        tracing::error!("Failed to {}: {:?}", context, e);
        AppError::Database(e)
    }
}

#[async_trait]
impl IssueRepository for PgIssueRepository {
    async fn create(&self, issue: CreateIssue) -> Result<IssueReport> {
        sqlx::query_as::<_, IssueReport>(
            r#"
            INSERT INTO issue_reports (user_id, title, description, image_url, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING
                id, user_id, title, description, image_url, status,
                latitude, longitude, likes_count, created_at, updated_at
            "#,
        )
        .bind(issue.user_id)
        .bind(&issue.title)
        .bind(&issue.description)
        .bind(&issue.image_url)
        .bind(issue.latitude)
        .bind(issue.longitude)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create issue"))
    }

    async fn list(&self, filter: IssueFilter) -> Result<Vec<IssueWithReporter>> {
        sqlx::query_as::<_, IssueWithReporter>(
            r#"
            SELECT
                i.id, i.user_id, i.title, i.description, i.image_url, i.status,
                i.latitude, i.longitude, i.likes_count, i.created_at, i.updated_at,
                u.name AS reporter_name
            FROM issue_reports i
            JOIN users u ON u.id = i.user_id
            WHERE ($1::issue_status IS NULL OR i.status = $1)
            ORDER BY i.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.status)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list issues"))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<IssueWithReporter>> {
        sqlx::query_as::<_, IssueWithReporter>(
            r#"
            SELECT
                i.id, i.user_id, i.title, i.description, i.image_url, i.status,
                i.latitude, i.longitude, i.likes_count, i.created_at, i.updated_at,
                u.name AS reporter_name
            FROM issue_reports i
            JOIN users u ON u.id = i.user_id
            WHERE i.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("get issue by id"))
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<IssueReport>> {
        sqlx::query_as::<_, IssueReport>(
            r#"
            SELECT
                id, user_id, title, description, image_url, status,
                latitude, longitude, likes_count, created_at, updated_at
            FROM issue_reports
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list issues by user"))
    }

    async fn update_status(&self, id: Uuid, status: IssueStatus) -> Result<Option<IssueReport>> {
        sqlx::query_as::<_, IssueReport>(
            r#"
            UPDATE issue_reports
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, user_id, title, description, image_url, status,
                latitude, longitude, likes_count, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("update issue status"))
    }

    async fn toggle_like(&self, user_id: Uuid, issue_id: Uuid) -> Result<Option<LikeToggle>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("begin like transaction"))?;

        // Row lock serializes concurrent toggles on the same issue
        let locked: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM issue_reports WHERE id = $1 FOR UPDATE")
                .bind(issue_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("lock issue"))?;

        if locked.is_none() {
            tx.rollback()
                .await
                .map_err(db_error("roll back like transaction"))?;
            return Ok(None);
        }

        let removed = sqlx::query("DELETE FROM issue_likes WHERE user_id = $1 AND issue_id = $2")
            .bind(user_id)
            .bind(issue_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("remove like"))?
            .rows_affected()
            > 0;

        if !removed {
            sqlx::query("INSERT INTO issue_likes (user_id, issue_id) VALUES ($1, $2)")
                .bind(user_id)
                .bind(issue_id)
                .execute(&mut *tx)
                .await
                .map_err(db_error("add like"))?;
        }

        let delta: i32 = if removed { -1 } else { 1 };
        let likes_count: i32 = sqlx::query_scalar(
            r#"
            UPDATE issue_reports
            SET likes_count = likes_count + $2
            WHERE id = $1
            RETURNING likes_count
            "#,
        )
        .bind(issue_id)
        .bind(delta)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("update like count"))?;

        tx.commit()
            .await
            .map_err(db_error("commit like transaction"))?;

        Ok(Some(LikeToggle {
            liked: !removed,
            likes_count,
        }))
    }

    async fn count_by_status(&self) -> Result<Vec<StatusCount>> {
        sqlx::query_as::<_, StatusCount>(
            r#"
            SELECT status, COUNT(*) AS count
            FROM issue_reports
            GROUP BY status
            ORDER BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("count issues by status"))
    }
}
