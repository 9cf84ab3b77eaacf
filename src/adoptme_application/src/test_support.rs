//! Hand-rolled fakes shared by the use case tests.

use std::sync::Arc;

use adoptme_core::{
    Adoption, AdoptionFilter, AdoptionLedger, Dao, Document, Email, HashingError, LedgerError,
    NewAdoption, NewUser, Password, PasswordHash, PasswordHasher, Pet, PetFilter, PetId, Role,
    StoreError, TokenError, TokenService, User, UserFilter, UserId,
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    pets: Vec<Pet>,
    adoptions: Vec<Adoption>,
    fail_adoption_records: bool,
}

#[derive(Clone, Default)]
pub struct FakeStore {
    tables: Arc<RwLock<Tables>>,
}

impl FakeStore {
    pub async fn users(&self) -> Vec<User> {
        self.tables.read().await.users.clone()
    }

    pub async fn pets(&self) -> Vec<Pet> {
        self.tables.read().await.pets.clone()
    }

    pub async fn adoptions(&self) -> Vec<Adoption> {
        self.tables.read().await.adoptions.clone()
    }

    pub async fn fail_adoption_records(&self) {
        self.tables.write().await.fail_adoption_records = true;
    }
}

fn get_one<D: Document>(docs: &[D], filter: &D::Filter) -> Option<D> {
    docs.iter().find(|d| d.matches(filter)).cloned()
}

fn update<D: Document>(docs: &mut [D], id: &D::Id, patch: D::Patch) -> Option<D> {
    let doc = docs.iter_mut().find(|d| d.id() == id)?;
    doc.apply(patch);
    Some(doc.clone())
}

fn delete<D: Document>(docs: &mut Vec<D>, id: &D::Id) -> Option<D> {
    let index = docs.iter().position(|d| d.id() == id)?;
    Some(docs.remove(index))
}

#[async_trait]
impl Dao<User> for FakeStore {
    async fn create(&self, draft: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        let user = User::from_draft(User::generate_id(), draft);
        if tables
            .users
            .iter()
            .any(|u| u.unique_conflict(&user).is_some())
        {
            return Err(StoreError::DuplicateKey {
                collection: User::COLLECTION,
                field: "email",
            });
        }
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn get_one(&self, filter: UserFilter) -> Result<Option<User>, StoreError> {
        Ok(get_one(&self.tables.read().await.users, &filter))
    }

    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users().await)
    }

    async fn update(
        &self,
        id: &UserId,
        patch: adoptme_core::UserPatch,
    ) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &patch.email {
            if tables.users.iter().any(|u| u.email() == email && u.id() != id) {
                return Err(StoreError::DuplicateKey {
                    collection: User::COLLECTION,
                    field: "email",
                });
            }
        }
        Ok(update(&mut tables.users, id, patch))
    }

    async fn delete(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(delete(&mut self.tables.write().await.users, id))
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        self.tables.write().await.users.clear();
        Ok(())
    }
}

#[async_trait]
impl Dao<Pet> for FakeStore {
    async fn create(&self, draft: adoptme_core::NewPet) -> Result<Pet, StoreError> {
        let pet = Pet::from_draft(Pet::generate_id(), draft);
        self.tables.write().await.pets.push(pet.clone());
        Ok(pet)
    }

    async fn get_one(&self, filter: PetFilter) -> Result<Option<Pet>, StoreError> {
        Ok(get_one(&self.tables.read().await.pets, &filter))
    }

    async fn get_all(&self) -> Result<Vec<Pet>, StoreError> {
        Ok(self.pets().await)
    }

    async fn update(
        &self,
        id: &PetId,
        patch: adoptme_core::PetPatch,
    ) -> Result<Option<Pet>, StoreError> {
        Ok(update(&mut self.tables.write().await.pets, id, patch))
    }

    async fn delete(&self, id: &PetId) -> Result<Option<Pet>, StoreError> {
        Ok(delete(&mut self.tables.write().await.pets, id))
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        self.tables.write().await.pets.clear();
        Ok(())
    }
}

#[async_trait]
impl Dao<Adoption> for FakeStore {
    async fn create(&self, draft: NewAdoption) -> Result<Adoption, StoreError> {
        let adoption = Adoption::from_draft(Adoption::generate_id(), draft);
        self.tables.write().await.adoptions.push(adoption.clone());
        Ok(adoption)
    }

    async fn get_one(&self, filter: AdoptionFilter) -> Result<Option<Adoption>, StoreError> {
        Ok(get_one(&self.tables.read().await.adoptions, &filter))
    }

    async fn get_all(&self) -> Result<Vec<Adoption>, StoreError> {
        Ok(self.adoptions().await)
    }

    async fn update(
        &self,
        _id: &adoptme_core::AdoptionId,
        patch: std::convert::Infallible,
    ) -> Result<Option<Adoption>, StoreError> {
        match patch {}
    }

    async fn delete(&self, id: &adoptme_core::AdoptionId) -> Result<Option<Adoption>, StoreError> {
        Ok(delete(&mut self.tables.write().await.adoptions, id))
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        self.tables.write().await.adoptions.clear();
        Ok(())
    }
}

#[async_trait]
impl AdoptionLedger for FakeStore {
    async fn record_adoption(
        &self,
        user_id: &UserId,
        pet_id: &PetId,
    ) -> Result<Adoption, LedgerError> {
        let mut tables = self.tables.write().await;
        if tables.fail_adoption_records {
            return Err(StoreError::UnexpectedError("adoptions unavailable".to_owned()).into());
        }
        let user_index = tables
            .users
            .iter()
            .position(|u| u.id() == user_id)
            .ok_or(LedgerError::UserNotFound)?;
        let pet_index = tables
            .pets
            .iter()
            .position(|p| p.id() == pet_id)
            .ok_or(LedgerError::PetNotFound)?;

        tables.pets[pet_index]
            .adopt_by(*user_id)
            .map_err(|_| LedgerError::AlreadyAdopted)?;
        tables.users[user_index].add_pet(*pet_id);

        let adoption = Adoption::from_draft(
            Adoption::generate_id(),
            NewAdoption {
                owner: *user_id,
                pet: *pet_id,
            },
        );
        tables.adoptions.push(adoption.clone());
        Ok(adoption)
    }
}

/// Reversible "hash" so tests can tell a hash from its plaintext.
#[derive(Clone, Default)]
pub struct FakeHasher;

#[async_trait]
impl PasswordHasher for FakeHasher {
    async fn hash(&self, password: Password) -> Result<PasswordHash, HashingError> {
        Ok(PasswordHash::new(Secret::new(format!(
            "hashed:{}",
            password.as_ref().expose_secret()
        ))))
    }

    async fn verify(&self, password: Password, hash: PasswordHash) -> Result<bool, HashingError> {
        Ok(hash.as_ref().expose_secret() == &format!("hashed:{}", password.as_ref().expose_secret()))
    }
}

/// Plain JSON "tokens"; `expired` and anything unparsable map to the matching errors.
#[derive(Clone, Default)]
pub struct FakeTokens;

impl TokenService for FakeTokens {
    fn issue<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        serde_json::to_string(claims).map_err(|e| TokenError::UnexpectedError(e.to_string()))
    }

    fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        if token == "expired" {
            return Err(TokenError::Expired);
        }
        serde_json::from_str(token).map_err(|_| TokenError::Invalid)
    }

    fn ttl_seconds(&self) -> i64 {
        3600
    }
}

pub fn new_user(email: &str, password_hash: &str) -> NewUser {
    NewUser {
        first_name: "Test".to_owned(),
        last_name: "User".to_owned(),
        email: Email::try_from(email).unwrap(),
        password: PasswordHash::new(Secret::new(password_hash.to_owned())),
        role: Role::User,
    }
}

pub fn new_pet(name: &str) -> adoptme_core::NewPet {
    adoptme_core::NewPet::parse(
        Some(name.to_owned()),
        Some("Dog".to_owned()),
        Some("2020-01-01".to_owned()),
    )
    .unwrap()
}
