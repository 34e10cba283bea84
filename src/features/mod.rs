pub mod admin;
pub mod auth;
pub mod issues;
pub mod notifications;
pub mod users;
