use tracing::instrument;

use crate::domain::{
    capture::{
        entities::{CaptureSource, CapturedImage},
        ports::CaptureService,
    },
    common::{entities::app_errors::CoreError, services::Service},
    detection::ports::IngredientDetector,
    recipe::ports::RecipeLookup,
};

impl<RL, D> CaptureService for Service<RL, D>
where
    RL: RecipeLookup,
    D: IngredientDetector,
{
    #[instrument(skip_all)]
    fn capture_image(&self, source: CaptureSource) -> Result<CapturedImage, CoreError> {
        self.frame_encoder.capture(source)
    }
}
