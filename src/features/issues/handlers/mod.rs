pub mod issue_handler;
mod submission;

pub use issue_handler::{
    __path_create_issue, __path_get_issue, __path_list_issues, __path_my_issues,
    __path_toggle_like, create_issue, get_issue, list_issues, my_issues, toggle_like,
};
pub use submission::IssueSubmission;
