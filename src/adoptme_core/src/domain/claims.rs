use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::domain::{
    email::Email,
    ids::{PetId, UserId},
    user::{Role, User},
};

/// Identity embedded in a protected session token. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
}

impl From<&User> for SessionClaims {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            name: user.full_name(),
            email: user.email().clone(),
            role: user.role(),
        }
    }
}

/// The whole user record, password hash included.
///
/// INSECURE: only the opt-in unprotected session mode issues tokens with this
/// shape. It exists to demonstrate what leaking a raw record into a token looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnprotectedClaims {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: String,
    pub role: Role,
    pub pets: Vec<PetId>,
}

impl From<&User> for UnprotectedClaims {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            email: user.email().clone(),
            password: user.password().as_ref().expose_secret().clone(),
            role: user.role(),
            pets: user.pets().to_vec(),
        }
    }
}
