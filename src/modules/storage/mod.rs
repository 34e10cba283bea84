//! Storage module for issue photos
//!
//! Writes uploaded images to a local directory that the HTTP layer serves
//! back under a public path.

mod local_storage;

pub use local_storage::LocalStorage;
