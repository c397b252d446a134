use std::future::Future;

use crate::domain::{
    capture::entities::CapturedImage, common::entities::app_errors::CoreError,
    ingredient::entities::Ingredient,
};

/// Remote capability turning an image into ingredient suggestions.
#[cfg_attr(test, mockall::automock)]
pub trait IngredientDetector: Send + Sync {
    fn detect(
        &self,
        image: CapturedImage,
    ) -> impl Future<Output = Result<Vec<String>, CoreError>> + Send;
}

/// Service trait for ingredient detection
pub trait DetectionService: Send + Sync {
    /// Normalized, deduplicated suggestions for `image`.
    fn detect_ingredients(
        &self,
        image: CapturedImage,
    ) -> impl Future<Output = Result<Vec<Ingredient>, CoreError>> + Send;
}
