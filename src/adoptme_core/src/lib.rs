pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    adoption::{Adoption, AdoptionFilter, NewAdoption},
    claims::{SessionClaims, UnprotectedClaims},
    email::Email,
    ids::{AdoptionId, IdError, PetId, UserId},
    password::{Password, PasswordHash},
    pet::{NewPet, Pet, PetError, PetFilter, PetPatch},
    user::{Credentials, NewUser, Registration, Role, User, UserFilter, UserPatch},
    validation::ValidationError,
};

pub use ports::{
    repositories::{AdoptionLedger, Dao, Document, LedgerError, Store, StoreError},
    services::{HashingError, PasswordHasher, TokenError, TokenService},
};
