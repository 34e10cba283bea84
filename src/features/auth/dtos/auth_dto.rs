use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::{User, UserRole};

/// Request DTO for user registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide email and password"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide email and password"))]
    pub password: String,
}

/// Response DTO for authentication (register/login)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    pub user: AuthUserDto,
    /// Bearer token for subsequent requests
    pub token: String,
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthUserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for AuthUserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validation() {
        let dto = RegisterRequestDto {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(dto.validate().is_ok());

        let short = RegisterRequestDto {
            password: "12345".to_string(),
            ..dto
        };
        assert!(short.validate().is_err());
    }

    #[test]
    fn test_register_missing_fields_fail_validation() {
        let dto: RegisterRequestDto = serde_json::from_str(r#"{"email":"ana@example.com"}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_user_dto_has_no_password() {
        let json = serde_json::to_value(AuthUserDto {
            id: Uuid::new_v4(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            role: UserRole::Citizen,
            created_at: Utc::now(),
        })
        .unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "CITIZEN");
    }
}
