use adoptme_core::{
    Credentials, Dao, HashingError, PasswordHasher, SessionClaims, StoreError, TokenError,
    TokenService, User,
};

use crate::services::users::UserService;

/// Error types specific to the login use cases
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("User doesn't exist")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Password hashing error: {0}")]
    HashingError(#[from] HashingError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] StoreError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

/// A signed token together with how long the cookie carrying it should live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub token: String,
    pub max_age_seconds: i64,
}

/// Looks the user up by email and checks the password against the stored hash.
pub(crate) async fn authenticate<S, H>(
    users: &UserService<S>,
    hasher: &H,
    credentials: Credentials,
) -> Result<User, LoginError>
where
    S: Dao<User>,
    H: PasswordHasher,
{
    let Credentials { email, password } = credentials;

    let user = users
        .get_by_email(&email)
        .await?
        .ok_or(LoginError::UserNotFound)?;

    if !hasher.verify(password, user.password().clone()).await? {
        return Err(LoginError::IncorrectPassword);
    }

    Ok(user)
}

/// Login use case - issues a token carrying [`SessionClaims`] only.
pub struct LoginUseCase<S, H, T> {
    users: UserService<S>,
    hasher: H,
    tokens: T,
}

impl<S, H, T> LoginUseCase<S, H, T>
where
    S: Dao<User>,
    H: PasswordHasher,
    T: TokenService,
{
    pub fn new(user_store: S, hasher: H, tokens: T) -> Self {
        Self {
            users: UserService::new(user_store),
            hasher,
            tokens,
        }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(&self, credentials: Credentials) -> Result<SessionToken, LoginError> {
        let user = authenticate(&self.users, &self.hasher, credentials).await?;

        let token = self.tokens.issue(&SessionClaims::from(&user))?;

        tracing::info!(user_id = %user.id(), "User logged in");
        Ok(SessionToken {
            token,
            max_age_seconds: self.tokens.ttl_seconds(),
        })
    }
}
