use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::issues::dtos::{
    CreateIssueDto, IssueImage, IssueListQuery, IssueResponseDto, LikeResponseDto,
};
use crate::features::issues::models::{CreateIssue, IssueFilter, IssueReport, IssueStatus};
use crate::features::issues::repositories::IssueRepository;
use crate::features::notifications::NotificationService;
use crate::features::users::UserRepository;
use crate::modules::storage::LocalStorage;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::side_effects::best_effort;
use crate::shared::types::PageRequest;

const MISSING_FIELDS: &str = "Please provide title, description, latitude, and longitude";

/// Service for citizen-facing issue operations
pub struct IssueService {
    issues: Arc<dyn IssueRepository>,
    users: Arc<dyn UserRepository>,
    notifications: Arc<NotificationService>,
    storage: Arc<LocalStorage>,
}

impl IssueService {
    pub fn new(
        issues: Arc<dyn IssueRepository>,
        users: Arc<dyn UserRepository>,
        notifications: Arc<NotificationService>,
        storage: Arc<LocalStorage>,
    ) -> Self {
        Self {
            issues,
            users,
            notifications,
            storage,
        }
    }

    /// Largest image accepted on submission, in bytes
    pub fn max_image_size(&self) -> usize {
        self.storage.max_image_size()
    }

    /// Create an issue owned by `reporter` and notify every admin.
    ///
    /// The optional `image` is stored first and takes precedence over any
    /// `image_url` in the payload; it is deleted again if the insert fails.
    /// Admin notifications are best-effort.
    pub async fn create_issue(
        &self,
        reporter: &AuthenticatedUser,
        dto: CreateIssueDto,
        image: Option<IssueImage>,
    ) -> Result<IssueResponseDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let title = non_blank(dto.title);
        let description = non_blank(dto.description);
        let (Some(title), Some(description), Some(latitude), Some(longitude)) =
            (title, description, dto.latitude, dto.longitude)
        else {
            return Err(AppError::Validation(MISSING_FIELDS.to_string()));
        };

        let stored = match image {
            Some(image) => Some(
                self.storage
                    .store_image(image.data, &image.content_type)
                    .await?,
            ),
            None => None,
        };
        let image_url = match &stored {
            Some(file) => Some(file.url.clone()),
            None => non_blank(dto.image_url),
        };

        let created = self
            .issues
            .create(CreateIssue {
                user_id: reporter.id,
                title,
                description,
                image_url,
                latitude,
                longitude,
            })
            .await;

        let issue = match created {
            Ok(issue) => issue,
            Err(e) => {
                // No row references the upload, so drop it
                if let Some(file) = stored {
                    best_effort("remove orphaned upload", self.storage.remove(&file.key)).await;
                }
                return Err(e);
            }
        };

        tracing::info!(
            "Issue created: id={}, user_id={}, title={}",
            issue.id,
            issue.user_id,
            issue.title
        );

        self.notify_admins(&issue, &reporter.name).await;

        Ok(issue.into())
    }

    /// Page through all issues, newest first
    pub async fn get_issues(
        &self,
        query: IssueListQuery,
    ) -> Result<(Vec<IssueResponseDto>, PageRequest)> {
        let status = query
            .status
            .as_deref()
            .map(str::parse::<IssueStatus>)
            .transpose()?;
        let page = PageRequest::new(query.page, query.limit, DEFAULT_PAGE_SIZE);

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

    pub async fn get_issue_by_id(&self, id: Uuid) -> Result<IssueResponseDto> {
        self.issues
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Issue not found".to_string()))
    }

    /// Issues reported by `user_id`, newest first
    pub async fn get_user_issues(&self, user_id: Uuid) -> Result<Vec<IssueResponseDto>> {
        let issues = self.issues.list_by_user(user_id).await?;
        Ok(issues.into_iter().map(Into::into).collect())
    }

    /// Flip the caller's like on an issue
    pub async fn toggle_like(&self, user_id: Uuid, issue_id: Uuid) -> Result<LikeResponseDto> {
        let toggle = self
            .issues
            .toggle_like(user_id, issue_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Issue not found".to_string()))?;

        tracing::debug!(
            "Like toggled: issue_id={}, user_id={}, liked={}, likes_count={}",
            issue_id,
            user_id,
            toggle.liked,
            toggle.likes_count
        );

        Ok(toggle.into())
    }

    /// One notification per admin. A failed write for one admin does not
    /// stop the rest.
    async fn notify_admins(&self, issue: &IssueReport, reporter_name: &str) {
        let Some(admins) = best_effort("list admins", self.users.list_admins()).await else {
            return;
        };

        let message = format!(
            "New issue reported: \"{}\" by {}",
            issue.title, reporter_name
        );

        for admin in admins {
            best_effort(
                "notify admin of new issue",
                self.notifications
                    .create_notification(admin.id, Some(issue.id), message.as_str()),
            )
            .await;
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::UserRole;
    use crate::shared::test_helpers::{test_storage, InMemoryStore};
    use tokio_test::{assert_err, assert_ok};

    fn service(store: &Arc<InMemoryStore>) -> IssueService {
        IssueService::new(
            store.clone(),
            store.clone(),
            Arc::new(NotificationService::new(store.clone())),
            test_storage(),
        )
    }

    fn pothole() -> CreateIssueDto {
        CreateIssueDto {
            title: Some("Pothole".to_string()),
            description: Some("Large hole".to_string()),
            latitude: Some(45.74),
            longitude: Some(21.20),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_issue_starts_open_and_notifies_each_admin() {
        let store = InMemoryStore::new();
        let citizen = store.seed_user("Ana", UserRole::Citizen);
        let first_admin = store.seed_user("Admin One", UserRole::Admin);
        let second_admin = store.seed_user("Admin Two", UserRole::Admin);
        let service = service(&store);

        let issue = service
            .create_issue(&citizen.clone().into(), pothole(), None)
            .await
            .unwrap();

        assert_eq!(issue.status, IssueStatus::Open);
        assert_eq!(issue.likes_count, 0);
        assert_eq!(issue.user_id, citizen.id);

        let notifications = store.notifications();
        assert_eq!(notifications.len(), 2);
        let mut recipients: Vec<_> = notifications.iter().map(|n| n.user_id).collect();
        recipients.sort();
        let mut expected = vec![first_admin.id, second_admin.id];
        expected.sort();
        assert_eq!(recipients, expected);
        assert!(notifications
            .iter()
            .all(|n| n.report_id == Some(issue.id)
                && n.message == "New issue reported: \"Pothole\" by Ana"));
    }

    #[tokio::test]
    async fn test_create_issue_survives_notification_failure() {
        let store = InMemoryStore::new();
        let citizen = store.seed_user("Ana", UserRole::Citizen);
        store.seed_user("Admin", UserRole::Admin);
        store.fail_notifications(true);
        let service = service(&store);

        let result = service
            .create_issue(&citizen.clone().into(), pothole(), None)
            .await;

        let issue = assert_ok!(result);
        assert!(store.notifications().is_empty());
        assert_ok!(service.get_issue_by_id(issue.id).await);
    }

    #[tokio::test]
    async fn test_create_issue_requires_all_fields() {
        let store = InMemoryStore::new();
        let citizen = store.seed_user("Ana", UserRole::Citizen);
        let service = service(&store);
        let reporter: AuthenticatedUser = citizen.into();

        let cases = [
            CreateIssueDto {
                title: None,
                ..pothole()
            },
            CreateIssueDto {
                description: Some("   ".to_string()),
                ..pothole()
            },
            CreateIssueDto {
                latitude: None,
                ..pothole()
            },
            CreateIssueDto {
                longitude: None,
                ..pothole()
            },
        ];

        for dto in cases {
            let result = service.create_issue(&reporter, dto, None).await;
            assert!(matches!(assert_err!(result), AppError::Validation(_)));
        }
        assert!(store.issues().is_empty());
    }

    #[tokio::test]
    async fn test_create_issue_accepts_zero_coordinates() {
        let store = InMemoryStore::new();
        let citizen = store.seed_user("Ana", UserRole::Citizen);
        let service = service(&store);

        let dto = CreateIssueDto {
            latitude: Some(0.0),
            longitude: Some(0.0),
            ..pothole()
        };
        let issue = service
            .create_issue(&citizen.into(), dto, None)
            .await
            .unwrap();
        assert_eq!(issue.latitude, 0.0);
    }

    #[tokio::test]
    async fn test_create_issue_stores_uploaded_image() {
        let store = InMemoryStore::new();
        let citizen = store.seed_user("Ana", UserRole::Citizen);
        let service = service(&store);

        let image = IssueImage {
            data: vec![0x89, b'P', b'N', b'G'],
            content_type: "image/png".to_string(),
        };
        let issue = service
            .create_issue(&citizen.into(), pothole(), Some(image))
            .await
            .unwrap();

        let url = issue.image_url.unwrap();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_create_issue_removes_upload_when_insert_fails() {
        let store = InMemoryStore::new();
        let citizen = store.seed_user("Ana", UserRole::Citizen);
        store.fail_issue_writes(true);
        let storage = test_storage();
        let service = IssueService::new(
            store.clone(),
            store.clone(),
            Arc::new(NotificationService::new(store.clone())),
            Arc::clone(&storage),
        );

        let image = IssueImage {
            data: vec![0x89, b'P', b'N', b'G'],
            content_type: "image/png".to_string(),
        };
        let result = service
            .create_issue(&citizen.into(), pothole(), Some(image))
            .await;

        assert!(matches!(assert_err!(result), AppError::Database(_)));
        assert!(store.issues().is_empty());
        let leftover = std::fs::read_dir(storage.uploads_dir()).unwrap().count();
        assert_eq!(leftover, 0);
    }

    #[tokio::test]
    async fn test_get_issue_by_id_not_found() {
        let store = InMemoryStore::new();
        let service = service(&store);

        let result = service.get_issue_by_id(Uuid::new_v4()).await;
        assert!(matches!(assert_err!(result), AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_issues_filters_and_pages_newest_first() {
        let store = InMemoryStore::new();
        let citizen = store.seed_user("Ana", UserRole::Citizen);
        let service = service(&store);
        let reporter: AuthenticatedUser = citizen.into();

        for title in ["one", "two", "three"] {
            let dto = CreateIssueDto {
                title: Some(title.to_string()),
                ..pothole()
            };
            service.create_issue(&reporter, dto, None).await.unwrap();
        }

        let (page, meta) = service
            .get_issues(IssueListQuery {
                page: Some(1),
                limit: Some(2),
                status: Some("OPEN".to_string()),
            })
            .await
            .unwrap();
        let titles: Vec<_> = page.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["three", "two"]);
        assert_eq!(meta.limit, 2);
        assert_eq!(page[0].reporter_name.as_deref(), Some("Ana"));

        let (resolved, _) = service
            .get_issues(IssueListQuery {
                status: Some("RESOLVED".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(resolved.is_empty());
    }

    #[tokio::test]
    async fn test_get_issues_rejects_unknown_status() {
        let store = InMemoryStore::new();
        let service = service(&store);

        let result = service
            .get_issues(IssueListQuery {
                status: Some("CLOSED".to_string()),
                ..Default::default()
            })
            .await;
        assert!(matches!(assert_err!(result), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_user_issues_only_returns_own() {
        let store = InMemoryStore::new();
        let ana = store.seed_user("Ana", UserRole::Citizen);
        let bo = store.seed_user("Bo", UserRole::Citizen);
        let service = service(&store);

        service
            .create_issue(&ana.clone().into(), pothole(), None)
            .await
            .unwrap();
        service
            .create_issue(&bo.into(), pothole(), None)
            .await
            .unwrap();

        let mine = service.get_user_issues(ana.id).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].user_id, ana.id);
        assert!(mine[0].reporter_name.is_none());
    }

    #[tokio::test]
    async fn test_toggle_like_alternates_and_restores_count() {
        let store = InMemoryStore::new();
        let ana = store.seed_user("Ana", UserRole::Citizen);
        let bo = store.seed_user("Bo", UserRole::Citizen);
        let service = service(&store);
        let issue = service
            .create_issue(&ana.into(), pothole(), None)
            .await
            .unwrap();

        let mut seen = Vec::new();
        for _ in 0..4 {
            let toggle = service.toggle_like(bo.id, issue.id).await.unwrap();
            seen.push((toggle.liked, toggle.likes_count));
        }

        assert_eq!(seen, vec![(true, 1), (false, 0), (true, 1), (false, 0)]);
        let reloaded = service.get_issue_by_id(issue.id).await.unwrap();
        assert_eq!(reloaded.likes_count, 0);
    }

    #[tokio::test]
    async fn test_toggle_like_on_missing_issue_is_not_found() {
        let store = InMemoryStore::new();
        let ana = store.seed_user("Ana", UserRole::Citizen);
        let service = service(&store);

        let result = service.toggle_like(ana.id, Uuid::new_v4()).await;
        assert!(matches!(assert_err!(result), AppError::NotFound(_)));
    }
}
