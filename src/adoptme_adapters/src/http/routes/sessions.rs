use adoptme_application::{
    CurrentSessionUseCase, LoginUseCase, RegisterUseCase, UnprotectedLoginUseCase,
};
use adoptme_core::{Credentials, Registration, SessionClaims, Store, UnprotectedClaims};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;

use super::{
    ApiError,
    error::session_error,
    success_message, success_payload,
};
use crate::http::{
    cookies::{create_session_cookie, extract_token},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<S: Store>(
    State(state): State<AppState<S>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let registration = Registration::parse(
        request.first_name,
        request.last_name,
        request.email,
        request.password,
    )?;

    let user_id = RegisterUseCase::new(state.store, state.hasher)
        .execute(registration)
        .await?;

    Ok(success_payload(user_id))
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<S: Store>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let credentials = Credentials::parse(request.email, request.password)?;

    let session = LoginUseCase::new(state.store, state.hasher, state.tokens)
        .execute(credentials)
        .await?;

    let cookie = create_session_cookie(
        &state.cookies.session,
        session.token,
        session.max_age_seconds,
    );

    Ok((jar.add(cookie), success_message("Logged in")))
}

#[tracing::instrument(name = "Current", skip_all)]
pub async fn current<S: Store>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let claims = CurrentSessionUseCase::new(state.tokens)
        .execute::<SessionClaims>(extract_token(&jar, &state.cookies.session))
        .map_err(|e| session_error(e, "No session cookie found", "Invalid or expired token"))?;

    Ok(success_payload(claims))
}

#[tracing::instrument(name = "UnprotectedLogin", skip_all)]
pub async fn unprotected_login<S: Store>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let credentials = Credentials::parse(request.email, request.password)?;

    let session = UnprotectedLoginUseCase::new(state.store, state.hasher, state.tokens)
        .execute(credentials)
        .await?;

    let cookie = create_session_cookie(
        &state.cookies.unprotected,
        session.token,
        session.max_age_seconds,
    );

    Ok((jar.add(cookie), success_message("Unprotected Logged in")))
}

#[tracing::instrument(name = "UnprotectedCurrent", skip_all)]
pub async fn unprotected_current<S: Store>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let claims = CurrentSessionUseCase::new(state.tokens)
        .execute::<UnprotectedClaims>(extract_token(&jar, &state.cookies.unprotected))
        .map_err(|e| {
            session_error(
                e,
                "No unprotected session cookie found",
                "Invalid or expired unprotected token",
            )
        })?;

    Ok(success_payload(claims))
}
