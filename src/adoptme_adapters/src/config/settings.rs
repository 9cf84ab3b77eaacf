use std::path::PathBuf;

use http::HeaderValue;
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

use super::constants::{
    CONFIGURATION_FILE, DEFAULT_UPLOAD_MAX_BYTES, DEFAULT_UPLOADS_DIR, SESSION_COOKIE_NAME,
    TOKEN_TTL_IN_SECONDS, UNPROTECTED_COOKIE_NAME,
    env::{ENV_PREFIX, ENV_SEPARATOR},
    prod,
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(String),
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
    #[error("database.url is required for the postgres backend")]
    MissingDatabaseUrl,
}

/// Process configuration.
///
/// Sources, later ones winning: built-in defaults, the optional
/// `configuration/base.json` file, then `ADOPTME__SECTION__KEY` environment
/// variables (a `.env` file is honoured). `auth.jwt_secret` has no default.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub uploads: UploadSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: AllowedOrigins::default(),
        }
    }
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_in_seconds: i64,
    #[serde(default = "default_session_cookie_name")]
    pub session_cookie_name: String,
    #[serde(default = "default_unprotected_cookie_name")]
    pub unprotected_cookie_name: String,
    /// Enables the insecure `/api/sessions/unprotected/*` routes.
    #[serde(default = "default_true")]
    pub unprotected_sessions_enabled: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseBackend {
    #[default]
    InMemory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub backend: DatabaseBackend,
    #[serde(default)]
    pub url: Option<Secret<String>>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::default(),
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    #[serde(default = "default_uploads_dir")]
    pub directory: PathBuf,
    #[serde(default = "default_upload_max_bytes")]
    pub max_bytes: usize,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            directory: default_uploads_dir(),
            max_bytes: default_upload_max_bytes(),
        }
    }
}

/// Browser origins allowed to call the API with credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        Self::load_from(CONFIGURATION_FILE)
    }

    /// Loads `path` (extension optional, missing file allowed) plus the environment.
    pub fn load_from(path: &str) -> Result<Self, SettingsError> {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("application.allowed_origins")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| SettingsError::Load(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SettingsError::Parse(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.database.backend == DatabaseBackend::Postgres && self.database.url.is_none() {
            return Err(SettingsError::MissingDatabaseUrl);
        }
        Ok(())
    }
}

fn default_host() -> String {
    prod::HOST.to_owned()
}

fn default_port() -> u16 {
    prod::PORT
}

fn default_token_ttl() -> i64 {
    TOKEN_TTL_IN_SECONDS
}

fn default_session_cookie_name() -> String {
    SESSION_COOKIE_NAME.to_owned()
}

fn default_unprotected_cookie_name() -> String {
    UNPROTECTED_COOKIE_NAME.to_owned()
}

fn default_true() -> bool {
    true
}

fn default_max_connections() -> u32 {
    prod::DB_MAX_CONNECTIONS
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from(DEFAULT_UPLOADS_DIR)
}

fn default_upload_max_bytes() -> usize {
    DEFAULT_UPLOAD_MAX_BYTES
}
