pub mod services;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export entity services
pub use services::{
    adoption_records::AdoptionRecordService,
    pets::PetService,
    users::{UserService, UserServiceError},
};

// Re-export use cases
pub use use_cases::{
    adopt_pet::{AdoptError, AdoptPetUseCase},
    current_session::{CurrentSessionUseCase, SessionError},
    generate_mock_data::{GeneratedData, MockDataError, MockDataUseCase},
    login::{LoginError, LoginUseCase, SessionToken},
    register::{RegisterError, RegisterUseCase},
    unprotected_login::UnprotectedLoginUseCase,
    update_user::{UpdateUserError, UpdateUserUseCase, UserChanges},
};
