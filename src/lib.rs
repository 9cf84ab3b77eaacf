//! # AdoptMe - Pet Adoption Service Library
//!
//! Facade crate that re-exports the public APIs of the adoption service components.
//!
//! ## Structure
//!
//! - **Core domain types**: `User`, `Pet`, `Adoption`, `Email`, ids, claims
//! - **Ports**: `Dao`, `AdoptionLedger`, `Store`, `PasswordHasher`, `TokenService`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `AdoptPetUseCase`, etc.
//! - **Adapters**: `InMemoryStore`, `PostgresStore`, `Argon2Hasher`, `JwtTokenService`, routes
//! - **Service**: `AdoptionService` - the HTTP entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use adoptme_core::*;
}

pub use adoptme_core::{
    Adoption, AdoptionId, Email, NewPet, Pet, PetId, Role, SessionClaims, UnprotectedClaims, User,
    UserId, ValidationError,
};

// ============================================================================
// Ports
// ============================================================================

pub use adoptme_core::{
    AdoptionLedger, Dao, Document, HashingError, LedgerError, PasswordHasher, Store, StoreError,
    TokenError, TokenService,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application services and use cases
pub mod use_cases {
    pub use adoptme_application::*;
}

pub use adoptme_application::{
    AdoptPetUseCase, CurrentSessionUseCase, LoginUseCase, MockDataUseCase, RegisterUseCase,
    UnprotectedLoginUseCase, UpdateUserUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers, state and error mapping
    pub mod http {
        pub use adoptme_adapters::http::*;
    }

    /// Store implementations
    pub mod persistence {
        pub use adoptme_adapters::persistence::*;
    }

    /// Configuration
    pub mod config {
        pub use adoptme_adapters::config::*;
    }
}

pub use adoptme_adapters::{Argon2Hasher, InMemoryStore, JwtTokenService, PostgresStore};

// ============================================================================
// Adoption Service (Main Entry Point)
// ============================================================================

pub use adoptme_service::{AdoptionService, ServiceOptions};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing store traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
