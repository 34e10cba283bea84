//! Per-user notifications.
//!
//! Other features emit notifications through [`NotificationService`]; users
//! read them and flip the read flag through the endpoints below.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/notifications` | Yes | List own notifications |
//! | PATCH | `/api/notifications/{id}/read` | Yes | Mark own notification read |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{NotificationRepository, PgNotificationRepository};
pub use services::NotificationService;
