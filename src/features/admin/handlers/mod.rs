pub mod admin_handlers;

pub use admin_handlers::{
    __path_get_stats, __path_list_issues, __path_update_issue_status, get_stats, list_issues,
    update_issue_status,
};
