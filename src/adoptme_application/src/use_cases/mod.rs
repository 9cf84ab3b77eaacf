pub mod adopt_pet;
pub mod current_session;
pub mod generate_mock_data;
pub mod login;
pub mod register;
pub mod unprotected_login;
pub mod update_user;
