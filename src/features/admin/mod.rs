//! Admin triage of issue reports.
//!
//! Every handler takes [`RequireAdmin`](crate::features::auth::guards::RequireAdmin);
//! the router itself only expects the auth middleware in front of it.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/admin/issues` | List issues (page, limit, status) |
//! | PATCH | `/api/admin/issues/{id}/status` | Change status, notify reporter |
//! | GET | `/api/admin/stats` | Issue counts per status |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::AdminService;
