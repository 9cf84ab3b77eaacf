use std::convert::Infallible;

use serde::Serialize;

use crate::{
    domain::ids::{AdoptionId, PetId, UserId},
    ports::repositories::Document,
};

/// Audit entry of a completed adoption. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adoption {
    id: AdoptionId,
    owner: UserId,
    pet: PetId,
}

impl Adoption {
    pub fn restore(id: AdoptionId, owner: UserId, pet: PetId) -> Self {
        Self { id, owner, pet }
    }

    pub fn id(&self) -> &AdoptionId {
        &self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn pet(&self) -> &PetId {
        &self.pet
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAdoption {
    pub owner: UserId,
    pub pet: PetId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdoptionFilter {
    Id(AdoptionId),
}

impl Document for Adoption {
    type Id = AdoptionId;
    type Draft = NewAdoption;
    // Records are append-only: no patch can be constructed.
    type Patch = Infallible;
    type Filter = AdoptionFilter;

    const COLLECTION: &'static str = "adoptions";

    fn generate_id() -> Self::Id {
        AdoptionId::new()
    }

    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self {
        Self {
            id,
            owner: draft.owner,
            pet: draft.pet,
        }
    }

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn apply(&mut self, patch: Self::Patch) {
        match patch {}
    }

    fn matches(&self, filter: &Self::Filter) -> bool {
        match filter {
            AdoptionFilter::Id(id) => &self.id == id,
        }
    }
}
