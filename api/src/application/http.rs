pub mod capture;
pub mod detection;
pub mod health;
pub mod ingredient;
pub mod recipe;
pub mod server;
pub mod session;
