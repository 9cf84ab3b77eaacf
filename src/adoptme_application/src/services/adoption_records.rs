use adoptme_core::{Adoption, AdoptionFilter, AdoptionId, Dao, NewAdoption, StoreError};

/// Read access to the adoption log. Records are immutable once written.
#[derive(Debug, Clone)]
pub struct AdoptionRecordService<S> {
    dao: S,
}

impl<S> AdoptionRecordService<S>
where
    S: Dao<Adoption>,
{
    pub fn new(dao: S) -> Self {
        Self { dao }
    }

    #[tracing::instrument(name = "AdoptionRecordService::get_all", skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Adoption>, StoreError> {
        self.dao.get_all().await
    }

    #[tracing::instrument(name = "AdoptionRecordService::get_by_id", skip(self))]
    pub async fn get_by_id(&self, id: AdoptionId) -> Result<Option<Adoption>, StoreError> {
        self.dao.get_one(AdoptionFilter::Id(id)).await
    }

    /// Appends a record without touching the user or pet. Adoptions go through
    /// [`AdoptPetUseCase`](crate::AdoptPetUseCase).
    #[tracing::instrument(name = "AdoptionRecordService::create", skip(self))]
    pub async fn create(&self, record: NewAdoption) -> Result<Adoption, StoreError> {
        self.dao.create(record).await
    }
}
