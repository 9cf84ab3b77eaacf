use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::domain::password::{Password, PasswordHash};

// ============================================================================
// Password hashing
// ============================================================================

#[derive(Debug, Error)]
#[error("Password hashing failed: {0}")]
pub struct HashingError(pub String);

/// One-way password transform.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<PasswordHash, HashingError>;

    /// `Ok(false)` on mismatch. Implementations compare in constant time.
    async fn verify(&self, password: Password, hash: PasswordHash) -> Result<bool, HashingError>;
}

// ============================================================================
// Session tokens
// ============================================================================

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for TokenError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Expired, Self::Expired)
                | (Self::Invalid, Self::Invalid)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Signs and verifies claim sets with an absolute expiry.
pub trait TokenService: Send + Sync {
    fn issue<C: Serialize>(&self, claims: &C) -> Result<String, TokenError>;

    fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError>;

    /// Lifetime of issued tokens, also used as the cookie max-age.
    fn ttl_seconds(&self) -> i64;
}
