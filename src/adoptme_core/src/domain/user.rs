use std::{fmt, str::FromStr};

use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        email::Email,
        ids::{PetId, UserId},
        password::{Password, PasswordHash},
        validation::{ValidationError, required_text},
    },
    ports::repositories::Document,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(ValidationError::InvalidField {
                field: "role",
                reason: format!("unknown role `{other}`"),
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    email: Email,
    password: PasswordHash,
    role: Role,
    pets: Vec<PetId>,
}

impl User {
    /// Rebuilds a user from persisted state.
    pub fn restore(
        id: UserId,
        first_name: String,
        last_name: String,
        email: Email,
        password: PasswordHash,
        role: Role,
        pets: Vec<PetId>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            password,
            role,
            pets,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &PasswordHash {
        &self.password
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Owned pets, in adoption order.
    pub fn pets(&self) -> &[PetId] {
        &self.pets
    }

    /// Appends a pet to the owned list. A pet already present is not added twice.
    pub fn add_pet(&mut self, pet_id: PetId) {
        if !self.pets.contains(&pet_id) {
            self.pets.push(pet_id);
        }
    }
}

/// Creation input for the `users` collection.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: PasswordHash,
    pub role: Role,
}

/// Fields a user update may touch. Everything else is immutable through updates.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub password: Option<PasswordHash>,
    pub role: Option<Role>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.role.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    Id(UserId),
    Email(Email),
}

impl Document for User {
    type Id = UserId;
    type Draft = NewUser;
    type Patch = UserPatch;
    type Filter = UserFilter;

    const COLLECTION: &'static str = "users";

    fn generate_id() -> Self::Id {
        UserId::new()
    }

    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            password: draft.password,
            role: draft.role,
            pets: Vec::new(),
        }
    }

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn apply(&mut self, patch: Self::Patch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(password) = patch.password {
            self.password = password;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
    }

    fn matches(&self, filter: &Self::Filter) -> bool {
        match filter {
            UserFilter::Id(id) => &self.id == id,
            UserFilter::Email(email) => &self.email == email,
        }
    }

    fn unique_conflict(&self, other: &Self) -> Option<&'static str> {
        (self.id != other.id && self.email == other.email).then_some("email")
    }
}

/// Validated sign-up form.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: Password,
}

impl Registration {
    /// Every field is mandatory; any missing or blank one yields `IncompleteValues`.
    pub fn parse(
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
        password: Option<Secret<String>>,
    ) -> Result<Self, ValidationError> {
        let first_name = required_text(first_name)?;
        let last_name = required_text(last_name)?;
        let email = Email::try_from(required_text(email)?)?;
        let password = password
            .ok_or(ValidationError::IncompleteValues)
            .and_then(|p| Password::try_from(p).map_err(|_| ValidationError::IncompleteValues))?;

        Ok(Self {
            first_name,
            last_name,
            email,
            password,
        })
    }
}

/// Validated login form.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: Password,
}

impl Credentials {
    pub fn parse(
        email: Option<String>,
        password: Option<Secret<String>>,
    ) -> Result<Self, ValidationError> {
        let email = Email::try_from(required_text(email)?)?;
        let password = password
            .ok_or(ValidationError::IncompleteValues)
            .and_then(|p| Password::try_from(p).map_err(|_| ValidationError::IncompleteValues))?;

        Ok(Self { email, password })
    }
}
