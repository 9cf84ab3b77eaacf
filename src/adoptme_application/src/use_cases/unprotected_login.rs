use adoptme_core::{Credentials, Dao, PasswordHasher, TokenService, UnprotectedClaims, User};

use crate::{
    services::users::UserService,
    use_cases::login::{LoginError, SessionToken, authenticate},
};

/// INSECURE login variant.
///
/// Runs the same checks as [`LoginUseCase`](crate::LoginUseCase) but signs the
/// whole user record, password hash included. Only wired up when unprotected
/// sessions are enabled, and always under its own cookie.
pub struct UnprotectedLoginUseCase<S, H, T> {
    users: UserService<S>,
    hasher: H,
    tokens: T,
}

impl<S, H, T> UnprotectedLoginUseCase<S, H, T>
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

    #[tracing::instrument(name = "UnprotectedLoginUseCase::execute", skip_all)]
    pub async fn execute(&self, credentials: Credentials) -> Result<SessionToken, LoginError> {
        let user = authenticate(&self.users, &self.hasher, credentials).await?;

        let token = self.tokens.issue(&UnprotectedClaims::from(&user))?;

        tracing::warn!(user_id = %user.id(), "Unprotected session issued");
        Ok(SessionToken {
            token,
            max_age_seconds: self.tokens.ttl_seconds(),
        })
    }
}
