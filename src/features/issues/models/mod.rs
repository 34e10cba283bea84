mod issue;

pub use issue::{
    CreateIssue, IssueFilter, IssueReport, IssueStatus, IssueWithReporter, LikeToggle,
    StatusCount,
};
