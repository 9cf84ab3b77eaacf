pub mod cookies;
pub mod routes;
pub mod state;
pub mod uploads;

pub use cookies::SessionCookies;
pub use routes::{ApiError, ErrorResponse, UserView};
pub use state::AppState;
pub use uploads::{ImageStore, UploadError};
