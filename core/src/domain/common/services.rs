use crate::domain::{
    capture::FrameEncoder, detection::ports::IngredientDetector, recipe::ports::RecipeLookup,
    recipe::value_objects::RankingConfig,
};

/// Application service wiring every port together.
///
/// Each domain area implements its service trait for this struct in its own
/// `services.rs`.
#[derive(Clone)]
pub struct Service<RL, D>
where
    RL: RecipeLookup,
    D: IngredientDetector,
{
    pub(crate) recipe_lookup: RL,
    pub(crate) detector: D,
    pub(crate) ranking: RankingConfig,
    pub(crate) frame_encoder: FrameEncoder,
}

impl<RL, D> Service<RL, D>
where
    RL: RecipeLookup,
    D: IngredientDetector,
{
    pub fn new(
        recipe_lookup: RL,
        detector: D,
        ranking: RankingConfig,
        frame_encoder: FrameEncoder,
    ) -> Self {
        Self {
            recipe_lookup,
            detector,
            ranking,
            frame_encoder,
        }
    }
}
