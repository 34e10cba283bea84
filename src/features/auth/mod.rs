//! Account registration, login and request authentication.
//!
//! Passwords are hashed with Argon2id. Sessions are stateless HS256 tokens;
//! [`JwtValidator`] resolves a token back to the stored user on every
//! protected request.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/auth/register` | No | Create a citizen account |
//! | POST | `/api/auth/login` | No | Exchange credentials for a token |
//! | GET | `/api/auth/me` | Yes | Current user profile |

mod validator;

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use services::{AuthService, TokenService};
pub use self::validator::JwtValidator;
