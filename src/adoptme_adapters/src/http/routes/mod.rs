pub mod adoptions;
pub mod error;
pub mod mocks;
pub mod pets;
pub mod sessions;
pub mod users;

use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};

pub use adoptions::{create_adoption, get_adoption, get_all_adoptions};
pub use error::{ApiError, ErrorResponse};
pub use mocks::{generate_data, mocking_pets, mocking_users};
pub use pets::{create_pet, create_pet_with_image, delete_pet, get_all_pets, update_pet};
pub use sessions::{current, login, register, unprotected_current, unprotected_login};
pub use users::{UserView, delete_user, get_all_users, get_user, update_user};

/// `{ "status": "success", "payload": ... }`
pub fn success_payload<T: Serialize>(payload: T) -> Json<Value> {
    Json(json!({ "status": "success", "payload": payload }))
}

/// `{ "status": "success", "message": ... }`
pub fn success_message(message: &str) -> Json<Value> {
    Json(json!({ "status": "success", "message": message }))
}
