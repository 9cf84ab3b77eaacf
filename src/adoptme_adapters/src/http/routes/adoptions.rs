use adoptme_application::{AdoptPetUseCase, AdoptionRecordService};
use adoptme_core::{AdoptionId, PetId, Store, UserId};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use super::{ApiError, success_message, success_payload};
use crate::http::state::AppState;

#[tracing::instrument(name = "GetAllAdoptions", skip_all)]
pub async fn get_all_adoptions<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError> {
    let adoptions = AdoptionRecordService::new(state.store).get_all().await?;
    Ok(success_payload(adoptions))
}

#[tracing::instrument(name = "GetAdoption", skip(state))]
pub async fn get_adoption<S: Store>(
    State(state): State<AppState<S>>,
    Path(aid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = AdoptionId::parse(&aid)?;

    let adoption = AdoptionRecordService::new(state.store)
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Adoption not found"))?;

    Ok(success_payload(adoption))
}

#[tracing::instrument(name = "CreateAdoption", skip(state))]
pub async fn create_adoption<S: Store>(
    State(state): State<AppState<S>>,
    Path((uid, pid)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = UserId::parse(&uid)?;
    let pet_id = PetId::parse(&pid)?;

    AdoptPetUseCase::new(state.store)
        .execute(user_id, pet_id)
        .await?;

    Ok(success_message("Pet adopted"))
}
