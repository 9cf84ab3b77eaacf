use adoptme_core::{
    Adoption, AdoptionLedger, Dao, LedgerError, Pet, PetId, StoreError, User, UserId,
};

use crate::services::{pets::PetService, users::UserService};

#[derive(Debug, thiserror::Error)]
pub enum AdoptError {
    #[error("User Not found")]
    UserNotFound,
    #[error("Pet not found")]
    PetNotFound,
    #[error("Pet is already adopted")]
    AlreadyAdopted,
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
}

impl From<LedgerError> for AdoptError {
    fn from(error: LedgerError) -> Self {
        match error {
            LedgerError::UserNotFound => Self::UserNotFound,
            LedgerError::PetNotFound => Self::PetNotFound,
            LedgerError::AlreadyAdopted => Self::AlreadyAdopted,
            LedgerError::StoreError(e) => Self::StoreError(e),
        }
    }
}

impl PartialEq for AdoptError {
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

/// Links a user to an available pet.
///
/// Both lookups and the availability check run before anything is written.
/// The writes themselves (user's pet list, pet owner, adoption record) are a
/// single [`AdoptionLedger`] call, which re-checks availability under its own
/// guard so a concurrent adoption of the same pet loses with `AlreadyAdopted`.
pub struct AdoptPetUseCase<S> {
    users: UserService<S>,
    pets: PetService<S>,
    ledger: S,
}

impl<S> AdoptPetUseCase<S>
where
    S: Dao<User> + Dao<Pet> + AdoptionLedger + Clone,
{
    pub fn new(store: S) -> Self {
        Self {
            users: UserService::new(store.clone()),
            pets: PetService::new(store.clone()),
            ledger: store,
        }
    }

    #[tracing::instrument(name = "AdoptPetUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId, pet_id: PetId) -> Result<Adoption, AdoptError> {
        if self.users.get_by_id(user_id).await?.is_none() {
            return Err(AdoptError::UserNotFound);
        }

        let pet = self
            .pets
            .get_by_id(pet_id)
            .await?
            .ok_or(AdoptError::PetNotFound)?;

        if pet.adopted() {
            return Err(AdoptError::AlreadyAdopted);
        }

        let adoption = self.ledger.record_adoption(&user_id, &pet_id).await?;

        tracing::info!(adoption_id = %adoption.id(), "Pet adopted");
        Ok(adoption)
    }
}
