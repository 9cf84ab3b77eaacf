use adoptme_core::Store;

use crate::{
    hashing::Argon2Hasher,
    http::{cookies::SessionCookies, uploads::ImageStore},
    tokens::JwtTokenService,
};

/// Shared by every route. Cloned per request; the store and services are cheap handles.
#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
    pub hasher: Argon2Hasher,
    pub tokens: JwtTokenService,
    pub cookies: SessionCookies,
    pub images: ImageStore,
}

impl<S: Store> AppState<S> {
    pub fn new(
        store: S,
        hasher: Argon2Hasher,
        tokens: JwtTokenService,
        cookies: SessionCookies,
        images: ImageStore,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
            cookies,
            images,
        }
    }
}
