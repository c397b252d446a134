use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct FridgeChefConfig {
    pub recipe_api: RecipeApiConfig,
    pub detection: DetectionConfig,
    pub ranking: RankingSettings,
    pub capture: CaptureConfig,
}

#[derive(Clone, Debug)]
pub struct RecipeApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetectorKind {
    Static,
    Http,
    Gemini,
}

#[derive(Clone, Debug)]
pub struct DetectionConfig {
    pub kind: DetectorKind,
    pub url: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct RankingSettings {
    pub max_results: usize,
    pub fallback_pool: usize,
}

#[derive(Clone, Debug)]
pub struct CaptureConfig {
    pub jpeg_quality: u8,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}
