use std::{convert::Infallible, sync::Arc};

use adoptme_core::{
    Adoption, AdoptionFilter, AdoptionId, AdoptionLedger, Dao, Document, LedgerError, NewAdoption,
    NewPet, NewUser, Pet, PetFilter, PetId, PetPatch, StoreError, User, UserFilter, UserId,
    UserPatch,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::collection::Collection;

#[derive(Debug, Default)]
struct Database {
    users: Collection<User>,
    pets: Collection<Pet>,
    adoptions: Collection<Adoption>,
}

/// Process-local store. Clones share the same data.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    db: Arc<RwLock<Database>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Dao<User> for InMemoryStore {
    #[tracing::instrument(name = "Adding user to memory", skip_all)]
    async fn create(&self, draft: NewUser) -> Result<User, StoreError> {
        self.db.write().await.users.insert(draft)
    }

    async fn get_one(&self, filter: UserFilter) -> Result<Option<User>, StoreError> {
        Ok(self.db.read().await.users.find(&filter).cloned())
    }

    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.db.read().await.users.all())
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<Option<User>, StoreError> {
        self.db.write().await.users.update(id, patch)
    }

    async fn delete(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.db.write().await.users.remove(id))
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        self.db.write().await.users.clear();
        Ok(())
    }
}

#[async_trait]
impl Dao<Pet> for InMemoryStore {
    async fn create(&self, draft: NewPet) -> Result<Pet, StoreError> {
        self.db.write().await.pets.insert(draft)
    }

    async fn get_one(&self, filter: PetFilter) -> Result<Option<Pet>, StoreError> {
        Ok(self.db.read().await.pets.find(&filter).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Pet>, StoreError> {
        Ok(self.db.read().await.pets.all())
    }

    async fn update(&self, id: &PetId, patch: PetPatch) -> Result<Option<Pet>, StoreError> {
        self.db.write().await.pets.update(id, patch)
    }

    async fn delete(&self, id: &PetId) -> Result<Option<Pet>, StoreError> {
        Ok(self.db.write().await.pets.remove(id))
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        self.db.write().await.pets.clear();
        Ok(())
    }
}

#[async_trait]
impl Dao<Adoption> for InMemoryStore {
    async fn create(&self, draft: NewAdoption) -> Result<Adoption, StoreError> {
        self.db.write().await.adoptions.insert(draft)
    }

    async fn get_one(&self, filter: AdoptionFilter) -> Result<Option<Adoption>, StoreError> {
        Ok(self.db.read().await.adoptions.find(&filter).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Adoption>, StoreError> {
        Ok(self.db.read().await.adoptions.all())
    }

    async fn update(
        &self,
        _id: &AdoptionId,
        patch: Infallible,
    ) -> Result<Option<Adoption>, StoreError> {
        match patch {}
    }

    async fn delete(&self, id: &AdoptionId) -> Result<Option<Adoption>, StoreError> {
        Ok(self.db.write().await.adoptions.remove(id))
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        self.db.write().await.adoptions.clear();
        Ok(())
    }
}

#[async_trait]
impl AdoptionLedger for InMemoryStore {
    /// Every check and write happens under one write lock.
    #[tracing::instrument(name = "Recording adoption in memory", skip(self))]
    async fn record_adoption(
        &self,
        user_id: &UserId,
        pet_id: &PetId,
    ) -> Result<Adoption, LedgerError> {
        let mut db = self.db.write().await;
        let Database {
            users,
            pets,
            adoptions,
        } = &mut *db;

        let user = users.get_mut(user_id).ok_or(LedgerError::UserNotFound)?;
        let pet = pets.get_mut(pet_id).ok_or(LedgerError::PetNotFound)?;

        pet.adopt_by(*user_id)
            .map_err(|_| LedgerError::AlreadyAdopted)?;
        user.add_pet(*pet_id);

        let adoption = Adoption::from_draft(
            Adoption::generate_id(),
            NewAdoption {
                owner: *user_id,
                pet: *pet_id,
            },
        );
        adoptions.push(adoption.clone());

        Ok(adoption)
    }
}
