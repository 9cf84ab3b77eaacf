use adoptme_application::PetService;
use adoptme_core::{NewPet, PetId, PetPatch, Store, ValidationError};
use axum::{
    Json,
    extract::{
        Multipart, Path, State,
        multipart::MultipartRejection,
        rejection::JsonRejection,
    },
    response::IntoResponse,
};
use serde::Deserialize;

use super::{ApiError, success_message, success_payload};
use crate::http::{
    state::AppState,
    uploads::{ImageStore, UploadError},
};

const INCOMPLETE_UPLOAD: &str = "Incomplete values or image not provided";

#[derive(Debug, Deserialize)]
pub struct CreatePetRequest {
    pub name: Option<String>,
    pub specie: Option<String>,
    #[serde(rename = "birthDate")]
    pub birth_date: Option<String>,
}

/// Allow-listed pet fields. Adoption state can only change through an adoption.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePetRequest {
    pub name: Option<String>,
    pub specie: Option<String>,
    #[serde(rename = "birthDate")]
    pub birth_date: Option<String>,
    pub image: Option<String>,
}

#[derive(Default)]
struct PetForm {
    name: Option<String>,
    specie: Option<String>,
    birth_date: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

#[tracing::instrument(name = "GetAllPets", skip_all)]
pub async fn get_all_pets<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError> {
    let pets = PetService::new(state.store).get_all().await?;
    Ok(success_payload(pets))
}

#[tracing::instrument(name = "CreatePet", skip_all)]
pub async fn create_pet<S: Store>(
    State(state): State<AppState<S>>,
    body: Result<Json<CreatePetRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let draft = NewPet::parse(request.name, request.specie, request.birth_date)?;

    let pet = PetService::new(state.store).create(draft).await?;

    tracing::info!(pet_id = %pet.id(), "Pet created");
    Ok(success_payload(pet))
}

#[tracing::instrument(name = "CreatePetWithImage", skip_all)]
pub async fn create_pet_with_image<S: Store>(
    State(state): State<AppState<S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let form = read_pet_form(multipart?).await?;

    let Some((file_name, bytes)) = form.image else {
        return Err(ApiError::BadRequest(INCOMPLETE_UPLOAD.to_owned()));
    };
    let draft = NewPet::parse(form.name, form.specie, form.birth_date).map_err(|e| match e {
        ValidationError::IncompleteValues => ApiError::BadRequest(INCOMPLETE_UPLOAD.to_owned()),
        other => other.into(),
    })?;

    let image = state.images.save(&file_name, &bytes).await?;
    let created = PetService::new(state.store)
        .create(draft.with_image(image.clone()))
        .await;
    let pet = discard_image_on_failure(&state.images, &image, created).await?;

    tracing::info!(pet_id = %pet.id(), image = %pet.image(), "Pet created with image");
    Ok(success_payload(pet))
}

#[tracing::instrument(name = "UpdatePet", skip(state, body))]
pub async fn update_pet<S: Store>(
    State(state): State<AppState<S>>,
    Path(pid): Path<String>,
    body: Result<Json<UpdatePetRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = PetId::parse(&pid)?;
    let Json(request) = body?;
    let patch = PetPatch::parse(
        request.name,
        request.specie,
        request.birth_date,
        request.image,
    )?;

    PetService::new(state.store)
        .update(id, patch)
        .await?
        .ok_or(ApiError::NotFound("Pet not found"))?;

    tracing::info!(pet_id = %id, "Pet updated");
    Ok(success_message("pet updated"))
}

#[tracing::instrument(name = "DeletePet", skip(state))]
pub async fn delete_pet<S: Store>(
    State(state): State<AppState<S>>,
    Path(pid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = PetId::parse(&pid)?;

    PetService::new(state.store)
        .delete(id)
        .await?
        .ok_or(ApiError::NotFound("Pet not found"))?;

    tracing::info!(pet_id = %id, "Pet deleted");
    Ok(success_message("pet deleted"))
}

/// Removes the stored upload when the pet it belongs to could not be created.
async fn discard_image_on_failure<T, E: Into<ApiError>>(
    images: &ImageStore,
    image: &str,
    result: Result<T, E>,
) -> Result<T, ApiError> {
    match result {
        Ok(value) => Ok(value),
        Err(e) => {
            if let Err(cleanup) = images.remove(image).await {
                tracing::error!(error = %cleanup, %image, "Failed to remove orphaned image");
            }
            Err(e.into())
        }
    }
}

async fn read_pet_form(mut multipart: Multipart) -> Result<PetForm, UploadError> {
    let mut form = PetForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "name" => form.name = Some(field.text().await?),
            "specie" => form.specie = Some(field.text().await?),
            "birthDate" => form.birth_date = Some(field.text().await?),
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await?;
                // An empty file part is what browsers send when nothing was picked
                if !bytes.is_empty() {
                    form.image = Some((file_name, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}
