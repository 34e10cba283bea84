//! Issue reports submitted by citizens.
//!
//! Creating an issue fans out a notification to every admin. Likes are a
//! per-user toggle backed by a denormalized counter on the issue row.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/issues` | No | List issues (page, limit, status) |
//! | GET | `/api/issues/{id}` | No | Get one issue |
//! | GET | `/api/issues/my-issues` | Yes | List own issues |
//! | POST | `/api/issues` | Yes | Report an issue (JSON or multipart) |
//! | POST | `/api/issues/{id}/like` | Yes | Toggle like |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{IssueRepository, PgIssueRepository};
pub use services::IssueService;
