mod adoptions;
mod mocks;
mod pets;
mod postgres;
mod sessions;
mod users;
