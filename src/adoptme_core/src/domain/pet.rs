use chrono::{DateTime, NaiveDate};
use serde::{Serialize, ser::SerializeStruct};
use thiserror::Error;

use crate::{
    domain::{
        ids::{PetId, UserId},
        validation::{ValidationError, non_empty_text, required_text},
    },
    ports::repositories::Document,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PetError {
    #[error("Pet is already adopted")]
    AlreadyAdopted,
}

/// A pet up for adoption.
///
/// Adoption state is carried by the owner alone: a pet is adopted exactly
/// when it has an owner, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    id: PetId,
    name: String,
    specie: String,
    birth_date: NaiveDate,
    image: String,
    owner: Option<UserId>,
}

impl Pet {
    /// Rebuilds a pet from persisted state.
    pub fn restore(
        id: PetId,
        name: String,
        specie: String,
        birth_date: NaiveDate,
        image: String,
        owner: Option<UserId>,
    ) -> Self {
        Self {
            id,
            name,
            specie,
            birth_date,
            image,
            owner,
        }
    }

    pub fn id(&self) -> &PetId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specie(&self) -> &str {
        &self.specie
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn adopted(&self) -> bool {
        self.owner.is_some()
    }

    pub fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
    }

    pub fn adopt_by(&mut self, owner: UserId) -> Result<(), PetError> {
        if self.adopted() {
            return Err(PetError::AlreadyAdopted);
        }
        self.owner = Some(owner);
        Ok(())
    }
}

impl Serialize for Pet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Pet", 7)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("specie", &self.specie)?;
        state.serialize_field("birthDate", &self.birth_date)?;
        state.serialize_field("image", &self.image)?;
        state.serialize_field("adopted", &self.adopted())?;
        state.serialize_field("owner", &self.owner)?;
        state.end()
    }
}

/// Creation input for the `pets` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    pub name: String,
    pub specie: String,
    pub birth_date: NaiveDate,
    pub image: String,
}

impl NewPet {
    /// Name, specie and birth date are mandatory; the image starts out empty.
    pub fn parse(
        name: Option<String>,
        specie: Option<String>,
        birth_date: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = required_text(name)?;
        let specie = required_text(specie)?;
        let birth_date = parse_birth_date(&required_text(birth_date)?)?;

        Ok(Self {
            name,
            specie,
            birth_date,
            image: String::new(),
        })
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// Fields a pet update may touch. Adoption state is deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetPatch {
    pub name: Option<String>,
    pub specie: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub image: Option<String>,
}

impl PetPatch {
    pub fn parse(
        name: Option<String>,
        specie: Option<String>,
        birth_date: Option<String>,
        image: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: name.map(|v| non_empty_text("name", v)).transpose()?,
            specie: specie.map(|v| non_empty_text("specie", v)).transpose()?,
            birth_date: birth_date.map(|v| parse_birth_date(&v)).transpose()?,
            image,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.specie.is_none()
            && self.birth_date.is_none()
            && self.image.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetFilter {
    Id(PetId),
}

impl Document for Pet {
    type Id = PetId;
    type Draft = NewPet;
    type Patch = PetPatch;
    type Filter = PetFilter;

    const COLLECTION: &'static str = "pets";

    fn generate_id() -> Self::Id {
        PetId::new()
    }

    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self {
        Self {
            id,
            name: draft.name,
            specie: draft.specie,
            birth_date: draft.birth_date,
            image: draft.image,
            owner: None,
        }
    }

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn apply(&mut self, patch: Self::Patch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(specie) = patch.specie {
            self.specie = specie;
        }
        if let Some(birth_date) = patch.birth_date {
            self.birth_date = birth_date;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
    }

    fn matches(&self, filter: &Self::Filter) -> bool {
        match filter {
            PetFilter::Id(id) => &self.id == id,
        }
    }
}

/// Accepts a calendar date (`2020-01-01`) or a full RFC 3339 timestamp.
pub fn parse_birth_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|e| ValidationError::InvalidField {
            field: "birthDate",
            reason: e.to_string(),
        })
}
