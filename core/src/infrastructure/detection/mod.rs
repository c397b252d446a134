pub mod http_detector;
pub mod static_detector;

pub use http_detector::HttpIngredientDetector;
pub use static_detector::StaticIngredientDetector;

use crate::{
    domain::{
        capture::entities::CapturedImage,
        common::{DetectionConfig, DetectorKind, entities::app_errors::CoreError},
        detection::ports::IngredientDetector,
    },
    infrastructure::llm::GeminiIngredientDetector,
};

/// The detector selected by configuration.
#[derive(Debug, Clone)]
pub enum DetectorAdapter {
    Static(StaticIngredientDetector),
    Http(HttpIngredientDetector),
    Gemini(GeminiIngredientDetector),
}

impl DetectorAdapter {
    pub fn from_config(config: &DetectionConfig) -> Result<Self, CoreError> {
        match config.kind {
            DetectorKind::Static => Ok(Self::Static(StaticIngredientDetector::default())),
            DetectorKind::Http => {
                let url = config.url.clone().ok_or_else(|| {
                    tracing::error!("HTTP detector selected without a detection URL");
                    CoreError::InternalServerError
                })?;
                Ok(Self::Http(HttpIngredientDetector::new(url, config.timeout)?))
            }
            DetectorKind::Gemini => {
                let api_key = config.gemini_api_key.clone().ok_or_else(|| {
                    tracing::error!("Gemini detector selected without an API key");
                    CoreError::InternalServerError
                })?;
                Ok(Self::Gemini(GeminiIngredientDetector::new(
                    api_key,
                    config.gemini_model.clone(),
                    config.timeout,
                )?))
            }
        }
    }
}

impl IngredientDetector for DetectorAdapter {
    async fn detect(&self, image: CapturedImage) -> Result<Vec<String>, CoreError> {
        match self {
            DetectorAdapter::Static(detector) => detector.detect(image).await,
            DetectorAdapter::Http(detector) => detector.detect(image).await,
            DetectorAdapter::Gemini(detector) => detector.detect(image).await,
        }
    }
}
