/// Default page size for the public issue feed
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Default page size for the admin issue table
pub const ADMIN_DEFAULT_PAGE_SIZE: i64 = 50;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Administrator role - can triage issues and change their status
pub const ROLE_ADMIN: &str = "ADMIN";

/// Citizen role - can report issues and track their reports
pub const ROLE_CITIZEN: &str = "CITIZEN";
