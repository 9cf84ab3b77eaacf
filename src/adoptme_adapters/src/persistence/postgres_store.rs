use std::convert::Infallible;

use adoptme_core::{
    Adoption, AdoptionFilter, AdoptionId, AdoptionLedger, Dao, Document, Email, LedgerError,
    NewAdoption, NewPet, NewUser, PasswordHash, Pet, PetFilter, PetId, PetPatch, Role, StoreError,
    User, UserFilter, UserId, UserPatch,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool, postgres::PgPoolOptions};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, role, pets";
const PET_COLUMNS: &str = "id, name, specie, birth_date, image, owner";
const ADOPTION_COLUMNS: &str = "id, owner, pet";
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// PostgreSQL-backed store. Schema lives in `migrations/`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool and brings the schema up to date.
    pub async fn connect(url: &Secret<String>, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url.expose_secret())
            .await
            .map_err(unexpected)?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::UnexpectedError(e.to_string()))
    }
}

fn unexpected(e: sqlx::Error) -> StoreError {
    StoreError::UnexpectedError(e.to_string())
}

fn map_write_error(e: sqlx::Error) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.constraint() == Some(EMAIL_CONSTRAINT) {
            return StoreError::DuplicateKey {
                collection: User::COLLECTION,
                field: "email",
            };
        }
    }
    unexpected(e)
}

// ============================================================================
// Rows
// ============================================================================

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    role: String,
    pets: Vec<Uuid>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email =
            Email::try_from(row.email).map_err(|e| StoreError::UnexpectedError(e.to_string()))?;
        let role: Role = row
            .role
            .parse()
            .map_err(|e: adoptme_core::ValidationError| StoreError::UnexpectedError(e.to_string()))?;

        Ok(User::restore(
            row.id.into(),
            row.first_name,
            row.last_name,
            email,
            PasswordHash::new(Secret::new(row.password_hash)),
            role,
            row.pets.into_iter().map(PetId::from).collect(),
        ))
    }
}

#[derive(FromRow)]
struct PetRow {
    id: Uuid,
    name: String,
    specie: String,
    birth_date: NaiveDate,
    image: String,
    owner: Option<Uuid>,
}

impl From<PetRow> for Pet {
    fn from(row: PetRow) -> Self {
        Pet::restore(
            row.id.into(),
            row.name,
            row.specie,
            row.birth_date,
            row.image,
            row.owner.map(UserId::from),
        )
    }
}

#[derive(FromRow)]
struct AdoptionRow {
    id: Uuid,
    owner: Uuid,
    pet: Uuid,
}

impl From<AdoptionRow> for Adoption {
    fn from(row: AdoptionRow) -> Self {
        Adoption::restore(row.id.into(), row.owner.into(), row.pet.into())
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl Dao<User> for PostgresStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn create(&self, draft: NewUser) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (id, first_name, last_name, email, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {USER_COLUMNS}"
        );

        let row: UserRow = sqlx::query_as(&query)
            .bind(*User::generate_id().as_uuid())
            .bind(&draft.first_name)
            .bind(&draft.last_name)
            .bind(draft.email.as_str())
            .bind(draft.password.as_ref().expose_secret())
            .bind(draft.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;

        row.try_into()
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_one(&self, filter: UserFilter) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = match filter {
            UserFilter::Id(id) => {
                sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                    .bind(*id.as_uuid())
                    .fetch_optional(&self.pool)
                    .await
            }
            UserFilter::Email(email) => {
                sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                    .bind(email.as_str())
                    .fetch_optional(&self.pool)
                    .await
            }
        }
        .map_err(unexpected)?;

        row.map(User::try_from).transpose()
    }

    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        let rows: Vec<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY seq"))
                .fetch_all(&self.pool)
                .await
                .map_err(unexpected)?;

        rows.into_iter().map(User::try_from).collect()
    }

    #[tracing::instrument(name = "Updating user in PostgreSQL", skip_all)]
    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<Option<User>, StoreError> {
        let query = format!(
            "UPDATE users SET \
                first_name = COALESCE($2, first_name), \
                last_name = COALESCE($3, last_name), \
                email = COALESCE($4, email), \
                password_hash = COALESCE($5, password_hash), \
                role = COALESCE($6, role) \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );

        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(*id.as_uuid())
            .bind(patch.first_name)
            .bind(patch.last_name)
            .bind(patch.email.map(String::from))
            .bind(patch.password.map(|p| p.as_ref().expose_secret().clone()))
            .bind(patch.role.map(|r| r.as_str()))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(name = "Delete user from PostgreSQL", skip_all)]
    async fn delete(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "DELETE FROM users WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        row.map(User::try_from).transpose()
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM users")
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }
}

// ============================================================================
// Pets
// ============================================================================

#[async_trait]
impl Dao<Pet> for PostgresStore {
    #[tracing::instrument(name = "Adding pet to PostgreSQL", skip_all)]
    async fn create(&self, draft: NewPet) -> Result<Pet, StoreError> {
        let query = format!(
            "INSERT INTO pets (id, name, specie, birth_date, image) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {PET_COLUMNS}"
        );

        let row: PetRow = sqlx::query_as(&query)
            .bind(*Pet::generate_id().as_uuid())
            .bind(&draft.name)
            .bind(&draft.specie)
            .bind(draft.birth_date)
            .bind(&draft.image)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(row.into())
    }

    async fn get_one(&self, filter: PetFilter) -> Result<Option<Pet>, StoreError> {
        let PetFilter::Id(id) = filter;
        let row: Option<PetRow> =
            sqlx::query_as(&format!("SELECT {PET_COLUMNS} FROM pets WHERE id = $1"))
                .bind(*id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(unexpected)?;

        Ok(row.map(Pet::from))
    }

    async fn get_all(&self) -> Result<Vec<Pet>, StoreError> {
        let rows: Vec<PetRow> =
            sqlx::query_as(&format!("SELECT {PET_COLUMNS} FROM pets ORDER BY seq"))
                .fetch_all(&self.pool)
                .await
                .map_err(unexpected)?;

        Ok(rows.into_iter().map(Pet::from).collect())
    }

    #[tracing::instrument(name = "Updating pet in PostgreSQL", skip_all)]
    async fn update(&self, id: &PetId, patch: PetPatch) -> Result<Option<Pet>, StoreError> {
        let query = format!(
            "UPDATE pets SET \
                name = COALESCE($2, name), \
                specie = COALESCE($3, specie), \
                birth_date = COALESCE($4, birth_date), \
                image = COALESCE($5, image) \
             WHERE id = $1 RETURNING {PET_COLUMNS}"
        );

        let row: Option<PetRow> = sqlx::query_as(&query)
            .bind(*id.as_uuid())
            .bind(patch.name)
            .bind(patch.specie)
            .bind(patch.birth_date)
            .bind(patch.image)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(row.map(Pet::from))
    }

    async fn delete(&self, id: &PetId) -> Result<Option<Pet>, StoreError> {
        let row: Option<PetRow> = sqlx::query_as(&format!(
            "DELETE FROM pets WHERE id = $1 RETURNING {PET_COLUMNS}"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(row.map(Pet::from))
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM pets")
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }
}

// ============================================================================
// Adoption records
// ============================================================================

#[async_trait]
impl Dao<Adoption> for PostgresStore {
    async fn create(&self, draft: NewAdoption) -> Result<Adoption, StoreError> {
        let row: AdoptionRow = sqlx::query_as(&format!(
            "INSERT INTO adoptions (id, owner, pet) VALUES ($1, $2, $3) \
             RETURNING {ADOPTION_COLUMNS}"
        ))
        .bind(*Adoption::generate_id().as_uuid())
        .bind(*draft.owner.as_uuid())
        .bind(*draft.pet.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(row.into())
    }

    async fn get_one(&self, filter: AdoptionFilter) -> Result<Option<Adoption>, StoreError> {
        let AdoptionFilter::Id(id) = filter;
        let row: Option<AdoptionRow> = sqlx::query_as(&format!(
            "SELECT {ADOPTION_COLUMNS} FROM adoptions WHERE id = $1"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(row.map(Adoption::from))
    }

    async fn get_all(&self) -> Result<Vec<Adoption>, StoreError> {
        let rows: Vec<AdoptionRow> = sqlx::query_as(&format!(
            "SELECT {ADOPTION_COLUMNS} FROM adoptions ORDER BY seq"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(rows.into_iter().map(Adoption::from).collect())
    }

    async fn update(
        &self,
        _id: &AdoptionId,
        patch: Infallible,
    ) -> Result<Option<Adoption>, StoreError> {
        match patch {}
    }

    async fn delete(&self, id: &AdoptionId) -> Result<Option<Adoption>, StoreError> {
        let row: Option<AdoptionRow> = sqlx::query_as(&format!(
            "DELETE FROM adoptions WHERE id = $1 RETURNING {ADOPTION_COLUMNS}"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(row.map(Adoption::from))
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM adoptions")
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }
}

#[async_trait]
impl AdoptionLedger for PostgresStore {
    /// One transaction; the pet row only flips while `adopted = FALSE`.
    #[tracing::instrument(name = "Recording adoption in PostgreSQL", skip(self))]
    async fn record_adoption(
        &self,
        user_id: &UserId,
        pet_id: &PetId,
    ) -> Result<Adoption, LedgerError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let user_exists: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR UPDATE")
                .bind(*user_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(unexpected)?;
        if user_exists.is_none() {
            return Err(LedgerError::UserNotFound);
        }

        let claimed: Option<Uuid> = sqlx::query_scalar(
            "UPDATE pets SET adopted = TRUE, owner = $1 \
             WHERE id = $2 AND adopted = FALSE RETURNING id",
        )
        .bind(*user_id.as_uuid())
        .bind(*pet_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(unexpected)?;

        if claimed.is_none() {
            let pet_exists: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pets WHERE id = $1)")
                    .bind(*pet_id.as_uuid())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(unexpected)?;
            return Err(if pet_exists {
                LedgerError::AlreadyAdopted
            } else {
                LedgerError::PetNotFound
            });
        }

        sqlx::query("UPDATE users SET pets = array_append(pets, $2) WHERE id = $1")
            .bind(*user_id.as_uuid())
            .bind(*pet_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        let row: AdoptionRow = sqlx::query_as(&format!(
            "INSERT INTO adoptions (id, owner, pet) VALUES ($1, $2, $3) \
             RETURNING {ADOPTION_COLUMNS}"
        ))
        .bind(*Adoption::generate_id().as_uuid())
        .bind(*user_id.as_uuid())
        .bind(*pet_id.as_uuid())
        .fetch_one(&mut *tx)
        .await
        .map_err(unexpected)?;

        tx.commit().await.map_err(unexpected)?;

        Ok(row.into())
    }
}
