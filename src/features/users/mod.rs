//! User accounts.
//!
//! Accounts are created through the auth feature; this module only owns the
//! model and the storage contract. There are no user-facing endpoints here.

pub mod models;
pub mod repositories;

pub use models::{User, UserRole};
pub use repositories::{PgUserRepository, UserRepository};
