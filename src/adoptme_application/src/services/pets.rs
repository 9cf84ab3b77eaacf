use adoptme_core::{Dao, NewPet, Pet, PetFilter, PetId, PetPatch, StoreError};

/// Pet collection access.
///
/// `update` is a plain merge of the allow-listed [`PetPatch`]; adoption state
/// can only change through the adoption ledger.
#[derive(Debug, Clone)]
pub struct PetService<S> {
    dao: S,
}

impl<S> PetService<S>
where
    S: Dao<Pet>,
{
    pub fn new(dao: S) -> Self {
        Self { dao }
    }

    #[tracing::instrument(name = "PetService::get_all", skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Pet>, StoreError> {
        self.dao.get_all().await
    }

    #[tracing::instrument(name = "PetService::get_by", skip(self))]
    pub async fn get_by(&self, filter: PetFilter) -> Result<Option<Pet>, StoreError> {
        self.dao.get_one(filter).await
    }

    pub async fn get_by_id(&self, id: PetId) -> Result<Option<Pet>, StoreError> {
        self.get_by(PetFilter::Id(id)).await
    }

    #[tracing::instrument(name = "PetService::create", skip(self))]
    pub async fn create(&self, pet: NewPet) -> Result<Pet, StoreError> {
        self.dao.create(pet).await
    }

    #[tracing::instrument(name = "PetService::update", skip(self))]
    pub async fn update(&self, id: PetId, patch: PetPatch) -> Result<Option<Pet>, StoreError> {
        self.dao.update(&id, patch).await
    }

    #[tracing::instrument(name = "PetService::delete", skip(self))]
    pub async fn delete(&self, id: PetId) -> Result<Option<Pet>, StoreError> {
        self.dao.delete(&id).await
    }
}
