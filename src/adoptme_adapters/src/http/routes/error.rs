use adoptme_application::{
    AdoptError, LoginError, MockDataError, RegisterError, SessionError, UpdateUserError,
    UserServiceError,
};
use adoptme_core::{IdError, StoreError, ValidationError};
use axum::{
    Json,
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::http::uploads::UploadError;

/// Body of every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl ApiError {
    pub fn incomplete_values() -> Self {
        Self::BadRequest(ValidationError::IncompleteValues.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            ApiError::BadRequest(error) => {
                tracing::warn!(%error, "Bad request");
                (StatusCode::BAD_REQUEST, error_body(error))
            }
            ApiError::Validation { message, details } => {
                tracing::warn!(error = %message, %details, "Invalid request");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        details: Some(details),
                        ..error_body(message)
                    },
                )
            }
            ApiError::NotFound(error) => {
                tracing::warn!(%error, "Resource not found");
                (StatusCode::NOT_FOUND, error_body(error.to_owned()))
            }
            ApiError::Unauthorized(error) => {
                tracing::warn!(%error, "Unauthorized");
                (StatusCode::UNAUTHORIZED, error_body(error))
            }
            ApiError::UnexpectedError(message) => {
                tracing::error!(error = %message, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        message: Some(message),
                        ..error_body("Internal Server Error".to_owned())
                    },
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}

fn error_body(error: String) -> ErrorResponse {
    ErrorResponse {
        status: "error".to_owned(),
        error,
        details: None,
        message: None,
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        match error.field() {
            None => ApiError::BadRequest(error.to_string()),
            Some(field) => {
                let mut details = serde_json::Map::new();
                details.insert(field.to_owned(), Value::String(error.to_string()));
                ApiError::Validation {
                    message: error.to_string(),
                    details: Value::Object(details),
                }
            }
        }
    }
}

impl From<IdError> for ApiError {
    fn from(error: IdError) -> Self {
        ApiError::Validation {
            message: error.to_string(),
            details: serde_json::json!({ "id": error.value }),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation {
            message: "Invalid request body".to_owned(),
            details: Value::String(rejection.body_text()),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::Validation {
            message: "Invalid multipart body".to_owned(),
            details: Value::String(rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation {
            message: "Invalid query string".to_owned(),
            details: Value::String(rejection.body_text()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        ApiError::UnexpectedError(error.to_string())
    }
}

impl From<UserServiceError> for ApiError {
    fn from(error: UserServiceError) -> Self {
        match error {
            UserServiceError::UserAlreadyExists => ApiError::BadRequest(error.to_string()),
            UserServiceError::StoreError(e) => e.into(),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::UserAlreadyExists => ApiError::BadRequest(error.to_string()),
            RegisterError::HashingError(e) => ApiError::UnexpectedError(e.to_string()),
            RegisterError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::UserNotFound => ApiError::NotFound("User doesn't exist"),
            LoginError::IncorrectPassword => ApiError::BadRequest(error.to_string()),
            LoginError::HashingError(e) => ApiError::UnexpectedError(e.to_string()),
            LoginError::UserStoreError(e) => e.into(),
            LoginError::TokenError(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<UpdateUserError> for ApiError {
    fn from(error: UpdateUserError) -> Self {
        match error {
            UpdateUserError::UserNotFound => ApiError::NotFound("User not found"),
            UpdateUserError::UserAlreadyExists => ApiError::BadRequest(error.to_string()),
            UpdateUserError::HashingError(e) => ApiError::UnexpectedError(e.to_string()),
            UpdateUserError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<AdoptError> for ApiError {
    fn from(error: AdoptError) -> Self {
        match error {
            AdoptError::UserNotFound => ApiError::NotFound("User Not found"),
            AdoptError::PetNotFound => ApiError::NotFound("Pet not found"),
            AdoptError::AlreadyAdopted => ApiError::BadRequest(error.to_string()),
            AdoptError::StoreError(e) => e.into(),
        }
    }
}

impl From<MockDataError> for ApiError {
    fn from(error: MockDataError) -> Self {
        match error {
            MockDataError::UserStoreError(e) => e.into(),
            other => ApiError::UnexpectedError(other.to_string()),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(error: UploadError) -> Self {
        match error {
            UploadError::Multipart(_) => ApiError::BadRequest(error.to_string()),
            UploadError::Io(_) => ApiError::UnexpectedError(error.to_string()),
        }
    }
}

/// Session errors differ per cookie, so callers pick the wording.
pub fn session_error(error: SessionError, no_session: &str, invalid: &str) -> ApiError {
    match error {
        SessionError::NoSession => ApiError::Unauthorized(no_session.to_owned()),
        SessionError::InvalidOrExpiredToken => ApiError::Unauthorized(invalid.to_owned()),
    }
}
