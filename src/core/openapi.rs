use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::issues::{
    dtos as issues_dtos, handlers as issues_handlers, models as issues_models,
};
use crate::features::notifications::{
    dtos as notifications_dtos, handlers as notifications_handlers,
};
use crate::features::users::UserRole;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::get_me,
        // Issues
        issues_handlers::list_issues,
        issues_handlers::get_issue,
        issues_handlers::my_issues,
        issues_handlers::create_issue,
        issues_handlers::toggle_like,
        // Notifications
        notifications_handlers::list_notifications,
        notifications_handlers::mark_notification_read,
        // Admin
        admin_handlers::list_issues,
        admin_handlers::update_issue_status,
        admin_handlers::get_stats,
    ),
    components(
        schemas(
            Meta,
            UserRole,
            // Auth
            auth_dtos::RegisterRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::AuthResponseDto,
            auth_dtos::AuthUserDto,
            ApiResponse<auth_dtos::AuthResponseDto>,
            ApiResponse<auth_dtos::AuthUserDto>,
            // Issues
            issues_models::IssueStatus,
            issues_dtos::CreateIssueDto,
            issues_dtos::UploadIssueDto,
            issues_dtos::IssueResponseDto,
            issues_dtos::LikeResponseDto,
            ApiResponse<issues_dtos::IssueResponseDto>,
            ApiResponse<Vec<issues_dtos::IssueResponseDto>>,
            ApiResponse<issues_dtos::LikeResponseDto>,
            // Notifications
            notifications_dtos::NotificationResponseDto,
            ApiResponse<notifications_dtos::NotificationResponseDto>,
            ApiResponse<Vec<notifications_dtos::NotificationResponseDto>>,
            // Admin
            admin_dtos::UpdateIssueStatusDto,
            admin_dtos::StatusCountDto,
            ApiResponse<Vec<admin_dtos::StatusCountDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and current user"),
        (name = "issues", description = "Citizen issue reports and likes"),
        (name = "notifications", description = "Per-user notifications"),
        (name = "admin", description = "Issue triage and statistics (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Civic Issues API",
        version = "0.1.0",
        description = "Municipal issue reporting API",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        for expected in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/me",
            "/api/issues",
            "/api/issues/{id}",
            "/api/issues/my-issues",
            "/api/issues/{id}/like",
            "/api/notifications",
            "/api/notifications/{id}/read",
            "/api/admin/issues",
            "/api/admin/issues/{id}/status",
            "/api/admin/stats",
        ] {
            assert!(paths.iter().any(|p| p == expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "Custom description".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
