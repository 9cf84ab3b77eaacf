use adoptme_core::{
    Dao, HashingError, NewUser, PasswordHasher, Registration, Role, StoreError, User, UserId,
};

use crate::services::users::{UserService, UserServiceError};

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Password hashing error: {0}")]
    HashingError(#[from] HashingError),
    #[error("User store error: {0}")]
    UserStoreError(StoreError),
}

impl From<UserServiceError> for RegisterError {
    fn from(error: UserServiceError) -> Self {
        match error {
            UserServiceError::UserAlreadyExists => Self::UserAlreadyExists,
            UserServiceError::StoreError(e) => Self::UserStoreError(e),
        }
    }
}

/// Creates an account with the default role.
pub struct RegisterUseCase<S, H> {
    users: UserService<S>,
    hasher: H,
}

impl<S, H> RegisterUseCase<S, H>
where
    S: Dao<User>,
    H: PasswordHasher,
{
    pub fn new(user_store: S, hasher: H) -> Self {
        Self {
            users: UserService::new(user_store),
            hasher,
        }
    }

    /// Hashes the password and stores the new user, returning its id.
    ///
    /// The email check is done by the store on insert, so two concurrent
    /// registrations for the same address cannot both succeed.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, registration: Registration) -> Result<UserId, RegisterError> {
        let Registration {
            first_name,
            last_name,
            email,
            password,
        } = registration;

        let password = self.hasher.hash(password).await?;

        let user = self
            .users
            .create(NewUser {
                first_name,
                last_name,
                email,
                password,
                role: Role::default(),
            })
            .await?;

        tracing::info!(user_id = %user.id(), "User registered");
        Ok(*user.id())
    }
}
