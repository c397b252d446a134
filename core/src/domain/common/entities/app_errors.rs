use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("No ingredient selected")]
    NoSelection,

    #[error("No image captured")]
    NoImage,

    #[error("Invalid ingredient name: {0}")]
    InvalidIngredient(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Not found")]
    NotFound,

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error")]
    InternalServerError,
}
