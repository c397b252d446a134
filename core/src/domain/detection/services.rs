use tracing::{debug, info, instrument};

use crate::domain::{
    capture::entities::CapturedImage,
    common::{entities::app_errors::CoreError, services::Service},
    detection::ports::{DetectionService, IngredientDetector},
    ingredient::{entities::Ingredient, value_objects::SelectedIngredients},
    recipe::ports::RecipeLookup,
};

/// Normalizes raw suggestions, dropping blanks and duplicates.
pub fn normalize_suggestions<I, S>(raw: I) -> Vec<Ingredient>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|name| match Ingredient::parse(name.as_ref()) {
            Ok(ingredient) => Some(ingredient),
            Err(e) => {
                debug!(error = %e, "Dropping detector suggestion");
                None
            }
        })
        .collect::<SelectedIngredients>()
        .to_vec()
}

impl<RL, D> DetectionService for Service<RL, D>
where
    RL: RecipeLookup,
    D: IngredientDetector,
{
    #[instrument(skip(self, image), fields(mime_type = %image.mime_type, size = image.len()))]
    async fn detect_ingredients(&self, image: CapturedImage) -> Result<Vec<Ingredient>, CoreError> {
        if image.is_empty() {
            return Err(CoreError::NoImage);
        }

        let raw = self.detector.detect(image).await?;
        let ingredients = normalize_suggestions(raw);

        info!(detected = ingredients.len(), "Ingredient detection completed");
        Ok(ingredients)
    }
}
