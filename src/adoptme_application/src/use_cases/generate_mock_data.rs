use adoptme_core::{
    Dao, Document, Email, HashingError, NewPet, NewUser, Password, PasswordHasher, Pet, PetId,
    Role, StoreError, User, UserId, ValidationError,
};
use chrono::{Days, Utc};
use fake::{
    Fake,
    faker::{
        internet::en::FreeEmailProvider,
        name::en::{FirstName, LastName},
    },
};
use rand::{Rng, distr::Alphanumeric, seq::IndexedRandom};
use secrecy::Secret;
use serde::Serialize;
use uuid::Uuid;

use crate::services::{
    pets::PetService,
    users::{UserService, UserServiceError},
};

const SPECIES: [&str; 5] = ["Dog", "Cat", "Bird", "Reptile", "Fish"];
const MAX_AGE_IN_DAYS: u64 = 5 * 365;
const PASSWORD_LENGTH: usize = 12;

#[derive(Debug, thiserror::Error)]
pub enum MockDataError {
    #[error("Password hashing error: {0}")]
    HashingError(#[from] HashingError),
    #[error("Invalid generated value: {0}")]
    ValidationError(#[from] ValidationError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserServiceError),
    #[error("Pet store error: {0}")]
    PetStoreError(#[from] StoreError),
}

/// Ids of the documents inserted by [`MockDataUseCase::generate`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct GeneratedData {
    pub users: Vec<UserId>,
    pub pets: Vec<PetId>,
}

struct UserSeed {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    role: Role,
}

/// Fake users and pets for demos and load tests.
///
/// Generated pets are always available, so seeded data never breaks the
/// `adopted` / `owner` pairing.
pub struct MockDataUseCase<S, H> {
    users: UserService<S>,
    pets: PetService<S>,
    hasher: H,
}

impl<S, H> MockDataUseCase<S, H>
where
    S: Dao<User> + Dao<Pet> + Clone,
    H: PasswordHasher,
{
    pub fn new(store: S, hasher: H) -> Self {
        Self {
            users: UserService::new(store.clone()),
            pets: PetService::new(store),
            hasher,
        }
    }

    /// Pets that exist only in the response, nothing is persisted.
    #[tracing::instrument(name = "MockDataUseCase::mock_pets", skip(self))]
    pub fn mock_pets(&self, quantity: usize) -> Vec<Pet> {
        pet_drafts(quantity)
            .into_iter()
            .map(|draft| Pet::from_draft(Pet::generate_id(), draft))
            .collect()
    }

    /// Users with hashed random passwords, not persisted.
    #[tracing::instrument(name = "MockDataUseCase::mock_users", skip(self))]
    pub async fn mock_users(&self, quantity: usize) -> Result<Vec<User>, MockDataError> {
        let mut users = Vec::with_capacity(quantity);
        for seed in user_seeds(quantity) {
            let draft = self.user_draft(seed).await?;
            users.push(User::from_draft(User::generate_id(), draft));
        }
        Ok(users)
    }

    #[tracing::instrument(name = "MockDataUseCase::generate", skip(self))]
    pub async fn generate(
        &self,
        users: usize,
        pets: usize,
    ) -> Result<GeneratedData, MockDataError> {
        let mut generated = GeneratedData::default();

        for seed in user_seeds(users) {
            let draft = self.user_draft(seed).await?;
            let user = self.users.create(draft).await?;
            generated.users.push(*user.id());
        }

        for draft in pet_drafts(pets) {
            let pet = self.pets.create(draft).await?;
            generated.pets.push(*pet.id());
        }

        tracing::info!(
            users = generated.users.len(),
            pets = generated.pets.len(),
            "Mock data inserted"
        );
        Ok(generated)
    }

    async fn user_draft(&self, seed: UserSeed) -> Result<NewUser, MockDataError> {
        let password = Password::try_from(Secret::new(seed.password))?;
        Ok(NewUser {
            first_name: seed.first_name,
            last_name: seed.last_name,
            email: Email::try_from(seed.email)?,
            password: self.hasher.hash(password).await?,
            role: seed.role,
        })
    }
}

// The thread-local rng is not `Send`, so every random value is drawn here
// before the async code gets to run.
fn user_seeds(quantity: usize) -> Vec<UserSeed> {
    let mut rng = rand::rng();
    (0..quantity)
        .map(|_| {
            let first_name: String = FirstName().fake_with_rng(&mut rng);
            let last_name: String = LastName().fake_with_rng(&mut rng);
            let provider: String = FreeEmailProvider().fake_with_rng(&mut rng);
            // Suffix keeps generated addresses unique within one batch.
            let suffix = Uuid::new_v4().simple().to_string();
            let email = format!(
                "{}.{}.{}@{}",
                first_name.to_lowercase(),
                last_name.to_lowercase(),
                &suffix[..8],
                provider
            );
            let password = (&mut rng)
                .sample_iter(Alphanumeric)
                .take(PASSWORD_LENGTH)
                .map(char::from)
                .collect();
            let role = if rng.random_bool(0.5) {
                Role::Admin
            } else {
                Role::User
            };

            UserSeed {
                first_name,
                last_name,
                email,
                password,
                role,
            }
        })
        .collect()
}

fn pet_drafts(quantity: usize) -> Vec<NewPet> {
    let mut rng = rand::rng();
    let today = Utc::now().date_naive();
    (0..quantity)
        .map(|index| {
            let specie = SPECIES.choose(&mut rng).copied().unwrap_or(SPECIES[0]);
            let age = Days::new(rng.random_range(0..=MAX_AGE_IN_DAYS));
            NewPet {
                name: FirstName().fake_with_rng(&mut rng),
                specie: specie.to_owned(),
                birth_date: today.checked_sub_days(age).unwrap_or(today),
                image: format!(
                    "https://loremflickr.com/320/240/{}?lock={}",
                    specie.to_lowercase(),
                    index
                ),
            }
        })
        .collect()
}
