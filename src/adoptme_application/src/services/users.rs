use adoptme_core::{Dao, Email, NewUser, StoreError, User, UserFilter, UserId, UserPatch};

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User store error: {0}")]
    StoreError(StoreError),
}

impl From<StoreError> for UserServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateKey { .. } => Self::UserAlreadyExists,
            other => Self::StoreError(other),
        }
    }
}

impl PartialEq for UserServiceError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists, Self::UserAlreadyExists) => true,
            (Self::StoreError(a), Self::StoreError(b)) => a == b,
            _ => false,
        }
    }
}

/// User collection access with the lookups login and registration need.
#[derive(Debug, Clone)]
pub struct UserService<S> {
    dao: S,
}

impl<S> UserService<S>
where
    S: Dao<User>,
{
    pub fn new(dao: S) -> Self {
        Self { dao }
    }

    #[tracing::instrument(name = "UserService::get_all", skip(self))]
    pub async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        self.dao.get_all().await
    }

    #[tracing::instrument(name = "UserService::get_by_id", skip(self))]
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.dao.get_one(UserFilter::Id(id)).await
    }

    #[tracing::instrument(name = "UserService::get_by_email", skip_all)]
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, StoreError> {
        self.dao.get_one(UserFilter::Email(email.clone())).await
    }

    /// Uniqueness of the email is left to the store, a conflict surfaces as `UserAlreadyExists`.
    #[tracing::instrument(name = "UserService::create", skip_all)]
    pub async fn create(&self, user: NewUser) -> Result<User, UserServiceError> {
        Ok(self.dao.create(user).await?)
    }

    #[tracing::instrument(name = "UserService::update", skip(self, patch))]
    pub async fn update(
        &self,
        id: UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, UserServiceError> {
        Ok(self.dao.update(&id, patch).await?)
    }

    #[tracing::instrument(name = "UserService::delete", skip(self))]
    pub async fn delete(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.dao.delete(&id).await
    }
}
