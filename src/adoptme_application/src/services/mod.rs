//! Entity services: thin, collection-specific wrappers over the generic [`Dao`](adoptme_core::Dao).

pub mod adoption_records;
pub mod pets;
pub mod users;
