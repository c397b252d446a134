pub mod capture;
pub mod common;
pub mod detection;
pub mod health;
pub mod ingredient;
pub mod recipe;
pub mod session;
