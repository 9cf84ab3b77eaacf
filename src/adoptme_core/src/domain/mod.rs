pub mod adoption;
pub mod claims;
pub mod email;
pub mod ids;
pub mod password;
pub mod pet;
pub mod user;
pub mod validation;
