use adoptme_application::MockDataUseCase;
use adoptme_core::Store;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use super::{ApiError, UserView, success_payload};
use crate::{
    config::{DEFAULT_MOCK_PETS, DEFAULT_MOCK_USERS, MAX_MOCK_QUANTITY},
    http::state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct QuantityQuery {
    pub quantity: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateDataQuery {
    pub users: Option<String>,
    pub pets: Option<String>,
}

#[tracing::instrument(name = "MockingPets", skip(state))]
pub async fn mocking_pets<S: Store>(
    State(state): State<AppState<S>>,
    query: Result<Query<QuantityQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let quantity = parse_quantity("quantity", query.quantity.as_deref(), DEFAULT_MOCK_PETS)?;

    let pets = MockDataUseCase::new(state.store, state.hasher).mock_pets(quantity);

    Ok(success_payload(pets))
}

#[tracing::instrument(name = "MockingUsers", skip(state))]
pub async fn mocking_users<S: Store>(
    State(state): State<AppState<S>>,
    query: Result<Query<QuantityQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let quantity = parse_quantity("quantity", query.quantity.as_deref(), DEFAULT_MOCK_USERS)?;

    let users = MockDataUseCase::new(state.store, state.hasher)
        .mock_users(quantity)
        .await?;
    let views: Vec<UserView> = users.iter().map(UserView::from).collect();

    Ok(success_payload(views))
}

#[tracing::instrument(name = "GenerateData", skip(state))]
pub async fn generate_data<S: Store>(
    State(state): State<AppState<S>>,
    query: Result<Query<GenerateDataQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let users = required_quantity("users", query.users.as_deref())?;
    let pets = required_quantity("pets", query.pets.as_deref())?;

    let generated = MockDataUseCase::new(state.store, state.hasher)
        .generate(users, pets)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "message": format!(
            "{} users and {} pets generated and inserted",
            generated.users.len(),
            generated.pets.len()
        ),
        "insertedUsers": generated.users,
        "insertedPets": generated.pets,
    })))
}

fn required_quantity(name: &str, raw: Option<&str>) -> Result<usize, ApiError> {
    match raw {
        Some(_) => parse_quantity(name, raw, 0),
        None => Err(ApiError::BadRequest(format!(
            "Query parameter `{name}` is required"
        ))),
    }
}

/// Absent means `default`; anything but a whole number in `0..=MAX_MOCK_QUANTITY` is a 400.
fn parse_quantity(name: &str, raw: Option<&str>, default: usize) -> Result<usize, ApiError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.trim().parse::<usize>() {
        Ok(quantity) if quantity <= MAX_MOCK_QUANTITY => Ok(quantity),
        _ => Err(ApiError::BadRequest(format!(
            "`{name}` must be a whole number between 0 and {MAX_MOCK_QUANTITY}"
        ))),
    }
}
