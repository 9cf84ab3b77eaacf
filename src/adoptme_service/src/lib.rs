mod adoption_service;
mod tracing;

pub use adoption_service::{AdoptionService, ServiceOptions};
pub use crate::tracing::REQUEST_ID_HEADER;
