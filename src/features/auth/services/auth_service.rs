use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    AuthResponseDto, AuthUserDto, LoginRequestDto, RegisterRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::password;
use crate::features::auth::services::TokenService;
use crate::features::users::models::NewUser;
use crate::features::users::{User, UserRepository, UserRole};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Service for authentication operations (register, login)
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Register a new citizen account and sign them in
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthResponseDto> {
        let email = dto.email.trim().to_lowercase();
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation(
                "Name must be 1-100 characters".to_string(),
            ));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let password_hash = hash_off_thread(dto.password).await?;

        let user = self
            .users
            .create(NewUser {
                name,
                email,
                password_hash,
                role: UserRole::Citizen,
            })
            .await?;

        tracing::info!("User registered: id={}, email={}", user.id, user.email);

        self.session_for(user)
    }

    /// Login with email and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let email = dto.email.trim().to_lowercase();

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !verify_off_thread(dto.password, user.password_hash.clone()).await? {
            tracing::debug!("Password mismatch for user {}", user.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        self.session_for(user)
    }

    /// Fresh profile of the signed-in user
    pub async fn get_current_user(&self, user: AuthenticatedUser) -> Result<AuthUserDto> {
        self.users
            .find_by_id(user.id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::Unauthorized("Not authorized, user not found".to_string()))
    }

    fn session_for(&self, user: User) -> Result<AuthResponseDto> {
        let token = self.tokens.create_token(user.id, user.role)?;
        Ok(AuthResponseDto {
            user: user.into(),
            token,
        })
    }
}

// Argon2 is CPU-bound; keep it off the async workers
async fn hash_off_thread(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
}

async fn verify_off_thread(password: String, password_hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || password::verify_password(&password, &password_hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
}
