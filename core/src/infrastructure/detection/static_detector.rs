use crate::domain::{
    capture::entities::CapturedImage, common::entities::app_errors::CoreError,
    detection::ports::IngredientDetector,
};

const CANNED_INGREDIENTS: &[&str] = &["tomato", "cheese", "egg"];

/// Placeholder detector returning a fixed suggestion list.
#[derive(Debug, Clone)]
pub struct StaticIngredientDetector {
    ingredients: Vec<String>,
}

impl StaticIngredientDetector {
    pub fn new(ingredients: Vec<String>) -> Self {
        Self { ingredients }
    }
}

impl Default for StaticIngredientDetector {
    fn default() -> Self {
        Self::new(CANNED_INGREDIENTS.iter().map(|s| s.to_string()).collect())
    }
}

impl IngredientDetector for StaticIngredientDetector {
    async fn detect(&self, _image: CapturedImage) -> Result<Vec<String>, CoreError> {
        Ok(self.ingredients.clone())
    }
}
