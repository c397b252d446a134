pub mod mappers;
pub mod themealdb_client;

pub use themealdb_client::TheMealDbClient;
