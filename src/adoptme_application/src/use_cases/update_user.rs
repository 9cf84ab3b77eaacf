use adoptme_core::{
    Dao, Email, HashingError, Password, PasswordHasher, Role, StoreError, User, UserId, UserPatch,
};

use crate::services::users::{UserService, UserServiceError};

#[derive(Debug, thiserror::Error)]
pub enum UpdateUserError {
    #[error("User not found")]
    UserNotFound,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Password hashing error: {0}")]
    HashingError(#[from] HashingError),
    #[error("User store error: {0}")]
    UserStoreError(StoreError),
}

impl From<UserServiceError> for UpdateUserError {
    fn from(error: UserServiceError) -> Self {
        match error {
            UserServiceError::UserAlreadyExists => Self::UserAlreadyExists,
            UserServiceError::StoreError(e) => Self::UserStoreError(e),
        }
    }
}

/// Profile changes as submitted. The password is still plaintext here.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub password: Option<Password>,
    pub role: Option<Role>,
}

pub struct UpdateUserUseCase<S, H> {
    users: UserService<S>,
    hasher: H,
}

impl<S, H> UpdateUserUseCase<S, H>
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

    #[tracing::instrument(name = "UpdateUserUseCase::execute", skip(self, changes))]
    pub async fn execute(&self, id: UserId, changes: UserChanges) -> Result<User, UpdateUserError> {
        let password = match changes.password {
            Some(password) => Some(self.hasher.hash(password).await?),
            None => None,
        };

        let patch = UserPatch {
            first_name: changes.first_name,
            last_name: changes.last_name,
            email: changes.email,
            password,
            role: changes.role,
        };

        self.users
            .update(id, patch)
            .await?
            .ok_or(UpdateUserError::UserNotFound)
    }
}
