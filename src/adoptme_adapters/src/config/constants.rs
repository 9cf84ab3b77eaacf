pub mod env {
    pub const ENV_PREFIX: &str = "ADOPTME";
    pub const ENV_SEPARATOR: &str = "__";
    pub const JWT_SECRET_ENV_VAR: &str = "ADOPTME__AUTH__JWT_SECRET";
    pub const DATABASE_URL_ENV_VAR: &str = "ADOPTME__DATABASE__URL";
}

pub const CONFIGURATION_FILE: &str = "configuration/base";

pub const SESSION_COOKIE_NAME: &str = "coderCookie";
pub const UNPROTECTED_COOKIE_NAME: &str = "unprotectedCookie";
pub const TOKEN_TTL_IN_SECONDS: i64 = 3600;

pub const DEFAULT_UPLOADS_DIR: &str = "public/img";
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;
/// Public path prefix under which uploaded images are served.
pub const IMAGE_ROUTE: &str = "/img";

pub const DEFAULT_MOCK_PETS: usize = 10;
pub const DEFAULT_MOCK_USERS: usize = 50;
/// Upper bound for any single mock quantity; each mock user costs one argon2 hash.
pub const MAX_MOCK_QUANTITY: usize = 1000;

pub mod prod {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 8080;
    pub const DB_MAX_CONNECTIONS: u32 = 5;
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
