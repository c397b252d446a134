use tracing::info;

use crate::{
    domain::{
        capture::FrameEncoder,
        common::{FridgeChefConfig, entities::app_errors::CoreError, services::Service},
        recipe::value_objects::RankingConfig,
    },
    infrastructure::{detection::DetectorAdapter, recipe::TheMealDbClient},
};

pub type FridgeChefService = Service<TheMealDbClient, DetectorAdapter>;

pub fn create_service(config: FridgeChefConfig) -> Result<FridgeChefService, CoreError> {
    let recipe_lookup = TheMealDbClient::new(config.recipe_api.clone())?;
    let detector = DetectorAdapter::from_config(&config.detection)?;

    info!(
        recipe_api = %config.recipe_api.base_url,
        detector = ?config.detection.kind,
        max_results = config.ranking.max_results,
        fallback_pool = config.ranking.fallback_pool,
        "Creating FridgeChef service"
    );

    Ok(Service::new(
        recipe_lookup,
        detector,
        RankingConfig::from(config.ranking),
        FrameEncoder::new(config.capture.jpeg_quality),
    ))
}
