//! Caller identity port.

use crate::domain::Principal;

/// Claims carried by a bearer token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub principal: Principal,
}

/// Token service trait - turns a bearer token into the caller principal.
pub trait TokenService: Send + Sync {
    /// Issue a token for a principal. The server never hands tokens out; this
    /// mints fixtures for tests and for local tooling.
    fn generate_token(&self, principal: &Principal) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,
}
