use std::sync::Arc;

use super::model::AuthenticatedUser;
use super::services::TokenService;
use crate::core::error::AppError;
use crate::features::users::UserRepository;

/// Turns a bearer token into the current user
pub struct JwtValidator {
    tokens: Arc<TokenService>,
    users: Arc<dyn UserRepository>,
}

impl JwtValidator {
    pub fn new(tokens: Arc<TokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }

    /// Verify the token signature and expiry, then load the user it names.
    /// A valid token for a deleted account is rejected.
    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let claims = self.tokens.decode_token(token)?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Not authorized, user not found".to_string()))?;

        Ok(user.into())
    }
}
