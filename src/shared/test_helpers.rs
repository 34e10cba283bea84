//! Test doubles shared by unit and router tests.
//!
//! [`InMemoryStore`] implements every repository trait over plain collections
//! so services can be exercised without Postgres. Its clock advances one
//! second per write, which keeps "newest first" ordering deterministic.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, Router};
use chrono::{DateTime, TimeZone, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use uuid::Uuid;

use crate::core::config::{AuthConfig, StorageConfig};
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::TokenService;
use crate::features::issues::models::{
    CreateIssue, IssueFilter, IssueReport, IssueStatus, IssueWithReporter, LikeToggle,
    StatusCount,
};
use crate::features::issues::IssueRepository;
use crate::features::notifications::models::{NewNotification, Notification};
use crate::features::notifications::NotificationRepository;
use crate::features::users::models::NewUser;
use crate::features::users::{User, UserRepository, UserRole};
use crate::modules::storage::LocalStorage;

#[derive(Default)]
struct State {
    ticks: i64,
    users: Vec<User>,
    issues: Vec<IssueReport>,
    likes: HashSet<(Uuid, Uuid)>,
    notifications: Vec<Notification>,
    fail_notifications: bool,
    fail_issue_writes: bool,
}

impl State {
    fn now(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        Utc.timestamp_opt(1_700_000_000 + self.ticks, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    fn with_reporter(&self, issue: &IssueReport) -> Option<IssueWithReporter> {
        let reporter = self.users.iter().find(|u| u.id == issue.user_id)?;
        Some(IssueWithReporter {
            issue: issue.clone(),
            reporter_name: reporter.name.clone(),
        })
    }
}

/// In-memory stand-in for every repository
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Insert a user directly. The password hash is not a real hash.
    pub fn seed_user(&self, name: &str, role: UserRole) -> User {
        let mut state = self.state();
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: SafeEmail().fake(),
            password_hash: "unusable".to_string(),
            role,
            created_at: state.now(),
        };
        state.users.push(user.clone());
        user
    }

    /// Insert an OPEN issue owned by `owner`
    pub fn seed_issue(&self, owner: &User, title: &str) -> IssueReport {
        let mut state = self.state();
        let now = state.now();
        let issue = IssueReport {
            id: Uuid::new_v4(),
            user_id: owner.id,
            title: title.to_string(),
            description: "Something is broken".to_string(),
            image_url: None,
            status: IssueStatus::Open,
            latitude: 45.74,
            longitude: 21.20,
            likes_count: 0,
            created_at: now,
            updated_at: now,
        };
        state.issues.push(issue.clone());
        issue
    }

    /// Make every notification write fail until switched back
    pub fn fail_notifications(&self, fail: bool) {
        self.state().fail_notifications = fail;
    }

    /// Make every issue insert fail as if the database were unreachable
    pub fn fail_issue_writes(&self, fail: bool) {
        self.state().fail_issue_writes = fail;
    }

    /// All stored notifications in insertion order
    pub fn notifications(&self) -> Vec<Notification> {
        self.state().notifications.clone()
    }

    /// All stored issues in insertion order
    pub fn issues(&self) -> Vec<IssueReport> {
        self.state().issues.clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.state().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .state()
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User> {
        let mut state = self.state();
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("User already exists".to_string()));
        }
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: state.now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn list_admins(&self) -> Result<Vec<User>> {
        Ok(self
            .state()
            .users
            .iter()
            .filter(|u| u.role == UserRole::Admin)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl IssueRepository for InMemoryStore {
    async fn create(&self, issue: CreateIssue) -> Result<IssueReport> {
        let mut state = self.state();
        if state.fail_issue_writes {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let now = state.now();
        let issue = IssueReport {
            id: Uuid::new_v4(),
            user_id: issue.user_id,
            title: issue.title,
            description: issue.description,
            image_url: issue.image_url,
            status: IssueStatus::Open,
            latitude: issue.latitude,
            longitude: issue.longitude,
            likes_count: 0,
            created_at: now,
            updated_at: now,
        };
        state.issues.push(issue.clone());
        Ok(issue)
    }

    async fn list(&self, filter: IssueFilter) -> Result<Vec<IssueWithReporter>> {
        let state = self.state();
        let mut rows: Vec<_> = state
            .issues
            .iter()
            .filter(|i| filter.status.is_none_or(|s| i.status == s))
            .filter_map(|i| state.with_reporter(i))
            .collect();
        rows.sort_by(|a, b| b.issue.created_at.cmp(&a.issue.created_at));
        Ok(rows
            .into_iter()
            .skip(filter.offset.max(0) as usize)
            .take(filter.limit.max(0) as usize)
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<IssueWithReporter>> {
        let state = self.state();
        Ok(state
            .issues
            .iter()
            .find(|i| i.id == id)
            .and_then(|i| state.with_reporter(i)))
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<IssueReport>> {
        let mut issues: Vec<_> = self
            .state()
            .issues
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        issues.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(issues)
    }

    async fn update_status(&self, id: Uuid, status: IssueStatus) -> Result<Option<IssueReport>> {
        let mut state = self.state();
        let now = state.now();
        Ok(state.issues.iter_mut().find(|i| i.id == id).map(|issue| {
            issue.status = status;
            issue.updated_at = now;
            issue.clone()
        }))
    }

    async fn toggle_like(&self, user_id: Uuid, issue_id: Uuid) -> Result<Option<LikeToggle>> {
        let mut state = self.state();
        if !state.issues.iter().any(|i| i.id == issue_id) {
            return Ok(None);
        }

        let liked = if state.likes.remove(&(user_id, issue_id)) {
            false
        } else {
            state.likes.insert((user_id, issue_id));
            true
        };

        let likes_count = state
            .likes
            .iter()
            .filter(|(_, issue)| *issue == issue_id)
            .count() as i32;
        if let Some(issue) = state.issues.iter_mut().find(|i| i.id == issue_id) {
            issue.likes_count = likes_count;
        }

        Ok(Some(LikeToggle { liked, likes_count }))
    }

    async fn count_by_status(&self) -> Result<Vec<StatusCount>> {
        let mut counts: BTreeMap<IssueStatus, i64> = BTreeMap::new();
        for issue in &self.state().issues {
            *counts.entry(issue.status).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect())
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn create(&self, notification: NewNotification) -> Result<Notification> {
        let mut state = self.state();
        if state.fail_notifications {
            return Err(AppError::Internal("notification store unavailable".to_string()));
        }
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: notification.user_id,
            report_id: notification.report_id,
            message: notification.message,
            is_read: false,
            created_at: state.now(),
        };
        state.notifications.push(notification.clone());
        Ok(notification)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        let mut notifications: Vec<_> = self
            .state()
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn mark_as_read(&self, id: Uuid, user_id: Uuid) -> Result<Option<Notification>> {
        Ok(self
            .state()
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
            .map(|n| {
                n.is_read = true;
                n.clone()
            }))
    }
}

/// Storage rooted in a fresh temp directory
pub fn test_storage() -> Arc<LocalStorage> {
    let uploads_dir = std::env::temp_dir().join(format!("civic-test-uploads-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&uploads_dir).unwrap();
    Arc::new(LocalStorage::new(StorageConfig {
        uploads_dir,
        public_path: "/uploads".to_string(),
        max_image_size: 1024 * 1024,
    }))
}

pub fn test_token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(&AuthConfig {
        jwt_secret: "test-secret".to_string(),
        token_ttl: Duration::from_secs(3600),
        jwt_leeway: Duration::from_secs(0),
    }))
}

/// Wrap `router` so every request arrives as `user`, skipping token checks
pub fn with_user(router: Router, user: &User) -> Router {
    let user = AuthenticatedUser::from(user.clone());
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
        },
    ))
}

