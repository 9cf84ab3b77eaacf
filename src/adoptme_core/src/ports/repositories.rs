use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    adoption::Adoption,
    ids::{PetId, UserId},
    pet::Pet,
    user::User,
};

// ============================================================================
// Documents
// ============================================================================

/// An entry of one of the store's collections.
///
/// Each entity declares how it is created (`Draft`), which fields may be
/// changed after creation (`Patch`) and how it can be looked up (`Filter`).
/// Store implementations stay collection-agnostic by working through this trait.
pub trait Document: Clone + Send + Sync + 'static {
    type Id: Copy + Eq + Debug + Send + Sync;
    type Draft: Send;
    type Patch: Send;
    type Filter: Debug + Send + Sync;

    /// Collection name, also used in log fields and error messages.
    const COLLECTION: &'static str;

    fn generate_id() -> Self::Id;

    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;

    fn id(&self) -> &Self::Id;

    /// Field-level merge of an allow-listed patch.
    fn apply(&mut self, patch: Self::Patch);

    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Returns the name of a unique field `self` shares with `other`, if any.
    fn unique_conflict(&self, _other: &Self) -> Option<&'static str> {
        None
    }
}

// ============================================================================
// Generic store access
// ============================================================================

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate value for unique field `{field}` in {collection}")]
    DuplicateKey {
        collection: &'static str,
        field: &'static str,
    },
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for StoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::DuplicateKey {
                    collection: c1,
                    field: f1,
                },
                Self::DuplicateKey {
                    collection: c2,
                    field: f2,
                },
            ) => c1 == c2 && f1 == f2,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Collection-agnostic CRUD. A missing document is `Ok(None)`, never an error.
#[async_trait]
pub trait Dao<D: Document>: Send + Sync {
    async fn create(&self, draft: D::Draft) -> Result<D, StoreError>;

    async fn get_one(&self, filter: D::Filter) -> Result<Option<D>, StoreError>;

    async fn get_all(&self) -> Result<Vec<D>, StoreError>;

    async fn update(&self, id: &D::Id, patch: D::Patch) -> Result<Option<D>, StoreError>;

    async fn delete(&self, id: &D::Id) -> Result<Option<D>, StoreError>;

    /// Bulk wipe. Used by tests and data seeding, never exposed over HTTP.
    async fn clear_all(&self) -> Result<(), StoreError>;
}

// ============================================================================
// Adoption ledger
// ============================================================================

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("User not found")]
    UserNotFound,
    #[error("Pet not found")]
    PetNotFound,
    #[error("Pet is already adopted")]
    AlreadyAdopted,
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
}

impl PartialEq for LedgerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::PetNotFound, Self::PetNotFound) => true,
            (Self::AlreadyAdopted, Self::AlreadyAdopted) => true,
            (Self::StoreError(a), Self::StoreError(b)) => a == b,
            _ => false,
        }
    }
}

/// Commits the mutating half of an adoption as one unit.
///
/// Implementations append the pet to the user's list, mark the pet adopted by
/// the user and append an adoption record, all or nothing. The pet write is
/// conditional on the pet still being available, so two requests racing for
/// the same pet cannot both succeed.
#[async_trait]
pub trait AdoptionLedger: Send + Sync {
    async fn record_adoption(
        &self,
        user_id: &UserId,
        pet_id: &PetId,
    ) -> Result<Adoption, LedgerError>;
}

/// Everything the HTTP layer needs from a backing store.
pub trait Store:
    Dao<User> + Dao<Pet> + Dao<Adoption> + AdoptionLedger + Clone + 'static
{
}

impl<T> Store for T where
    T: Dao<User> + Dao<Pet> + Dao<Adoption> + AdoptionLedger + Clone + 'static
{
}
