use adoptme_core::{TokenError, TokenService};
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SessionError {
    #[error("No session cookie found")]
    NoSession,
    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,
}

/// Reads back the claims of a session cookie.
///
/// The claim shape is chosen by the caller, so the same use case serves the
/// protected and the unprotected session.
pub struct CurrentSessionUseCase<T> {
    tokens: T,
}

impl<T> CurrentSessionUseCase<T>
where
    T: TokenService,
{
    pub fn new(tokens: T) -> Self {
        Self { tokens }
    }

    #[tracing::instrument(name = "CurrentSessionUseCase::execute", skip_all)]
    pub fn execute<C: DeserializeOwned>(&self, token: Option<&str>) -> Result<C, SessionError> {
        let token = token.ok_or(SessionError::NoSession)?;

        self.tokens.verify(token).map_err(|e| {
            match e {
                TokenError::Expired => tracing::debug!("Session token expired"),
                other => tracing::debug!(error = %other, "Session token rejected"),
            }
            SessionError::InvalidOrExpiredToken
        })
    }
}
