pub mod camera;
pub mod encoder;
pub mod entities;
pub mod ports;
pub mod services;

pub use camera::*;
pub use encoder::*;
pub use entities::*;
