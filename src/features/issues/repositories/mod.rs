mod issue_repository;

pub use issue_repository::{IssueRepository, PgIssueRepository};
