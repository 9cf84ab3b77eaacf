use adoptme_application::{UpdateUserUseCase, UserChanges, UserService};
use adoptme_core::{
    Email, Password, PetId, Role, Store, User, UserId, ValidationError,
    domain::validation::non_empty_text,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::{ApiError, success_message, success_payload};
use crate::http::state::AppState;

/// Public shape of a user. The password hash never leaves the server.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserView {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub role: Role,
    pub pets: Vec<PetId>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            email: user.email().clone(),
            role: user.role(),
            pets: user.pets().to_vec(),
        }
    }
}

/// Fields a client may change. Anything else in the body is rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
    pub role: Option<String>,
}

impl TryFrom<UpdateUserRequest> for UserChanges {
    type Error = ValidationError;

    fn try_from(request: UpdateUserRequest) -> Result<Self, Self::Error> {
        Ok(UserChanges {
            first_name: request
                .first_name
                .map(|v| non_empty_text("first_name", v))
                .transpose()?,
            last_name: request
                .last_name
                .map(|v| non_empty_text("last_name", v))
                .transpose()?,
            email: request.email.map(Email::try_from).transpose()?,
            password: request.password.map(Password::try_from).transpose()?,
            role: request.role.map(|r| r.parse()).transpose()?,
        })
    }
}

#[tracing::instrument(name = "GetAllUsers", skip_all)]
pub async fn get_all_users<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError> {
    let users = UserService::new(state.store).get_all().await?;
    let views: Vec<UserView> = users.iter().map(UserView::from).collect();

    Ok(success_payload(views))
}

#[tracing::instrument(name = "GetUser", skip(state))]
pub async fn get_user<S: Store>(
    State(state): State<AppState<S>>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = UserId::parse(&uid)?;

    let user = UserService::new(state.store)
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(success_payload(UserView::from(&user)))
}

#[tracing::instrument(name = "UpdateUser", skip(state, body))]
pub async fn update_user<S: Store>(
    State(state): State<AppState<S>>,
    Path(uid): Path<String>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = UserId::parse(&uid)?;
    let Json(request) = body?;
    let changes = UserChanges::try_from(request)?;

    UpdateUserUseCase::new(state.store, state.hasher)
        .execute(id, changes)
        .await?;

    tracing::info!(user_id = %id, "User updated");
    Ok(success_message("User updated"))
}

#[tracing::instrument(name = "DeleteUser", skip(state))]
pub async fn delete_user<S: Store>(
    State(state): State<AppState<S>>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = UserId::parse(&uid)?;

    UserService::new(state.store)
        .delete(id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    tracing::info!(user_id = %id, "User deleted");
    Ok(success_message("User deleted"))
}
