pub mod config;
pub mod hashing;
pub mod http;
pub mod persistence;
pub mod tokens;

pub use hashing::Argon2Hasher;
pub use http::{AppState, ImageStore, SessionCookies};
pub use persistence::{InMemoryStore, PostgresStore};
pub use tokens::JwtTokenService;
