pub mod ports;
pub mod schema;
pub mod services;

pub use ports::*;
