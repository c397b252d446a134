use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum, builder::RangedU64ValueParser};
use fridgechef_core::domain::{
    common::{
        CaptureConfig, DetectionConfig, DetectorKind, FridgeChefConfig, RankingSettings,
        RecipeApiConfig,
    },
    recipe::value_objects::{DEFAULT_FALLBACK_POOL, DEFAULT_MAX_RESULTS},
};

#[derive(Debug, Clone, Parser)]
#[command(name = "fridgechef", version, about = "Photo-to-recipe assistant API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub recipe_api: RecipeApiArgs,

    #[command(flatten)]
    pub detection: DetectionArgs,

    #[command(flatten)]
    pub ranking: RankingArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api`.
    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,

    /// Directory holding the built single-page frontend.
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Seconds a session may stay untouched before it is dropped.
    #[arg(
        long,
        env = "SESSION_IDLE_TTL_SECS",
        default_value_t = 1800,
        value_parser = clap::value_parser!(u64).range(1..=604_800)
    )]
    pub session_idle_ttl_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct RecipeApiArgs {
    #[arg(
        long,
        env = "RECIPE_API_URL",
        default_value = "https://www.themealdb.com/api/json/v1/1"
    )]
    pub recipe_api_url: String,

    #[arg(long, env = "RECIPE_API_TIMEOUT_SECS", default_value_t = 10)]
    pub recipe_api_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DetectorArg {
    Static,
    Http,
    Gemini,
}

impl From<DetectorArg> for DetectorKind {
    fn from(value: DetectorArg) -> Self {
        match value {
            DetectorArg::Static => DetectorKind::Static,
            DetectorArg::Http => DetectorKind::Http,
            DetectorArg::Gemini => DetectorKind::Gemini,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct DetectionArgs {
    #[arg(long, env = "DETECTOR", value_enum, default_value_t = DetectorArg::Static)]
    pub detector: DetectorArg,

    /// Endpoint of the HTTP detector.
    #[arg(long, env = "DETECTION_URL")]
    pub detection_url: Option<String>,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    #[arg(long, env = "DETECTION_TIMEOUT_SECS", default_value_t = 30)]
    pub detection_timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct RankingArgs {
    /// Recipes resolved to full detail per search.
    #[arg(
        long,
        env = "MAX_RESULTS",
        default_value_t = DEFAULT_MAX_RESULTS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_results: usize,

    /// Candidates kept by the scored-union fallback.
    #[arg(
        long,
        env = "FALLBACK_POOL",
        default_value_t = DEFAULT_FALLBACK_POOL,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub fallback_pool: usize,

    #[arg(long, env = "JPEG_QUALITY", default_value_t = 85)]
    pub jpeg_quality: u8,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<Args> for FridgeChefConfig {
    fn from(args: Args) -> Self {
        Self {
            recipe_api: RecipeApiConfig {
                base_url: args.recipe_api.recipe_api_url,
                timeout: Duration::from_secs(args.recipe_api.recipe_api_timeout_secs),
            },
            detection: DetectionConfig {
                kind: args.detection.detector.into(),
                url: args.detection.detection_url,
                gemini_api_key: args.detection.gemini_api_key,
                gemini_model: args.detection.gemini_model,
                timeout: Duration::from_secs(args.detection.detection_timeout_secs),
            },
            ranking: RankingSettings {
                max_results: args.ranking.max_results,
                fallback_pool: args.ranking.fallback_pool,
            },
            capture: CaptureConfig {
                jpeg_quality: args.ranking.jpeg_quality,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_map_to_config() {
        let args = Args::try_parse_from(["fridgechef"]).unwrap();
        let config = FridgeChefConfig::from(args);

        assert_eq!(config.ranking.max_results, 20);
        assert_eq!(config.ranking.fallback_pool, 30);
        assert_eq!(config.detection.kind, DetectorKind::Static);
    }

    #[test]
    fn test_detector_and_origins() {
        let args = Args::try_parse_from([
            "fridgechef",
            "--detector",
            "http",
            "--detection-url",
            "http://localhost:9000/detect",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ])
        .unwrap();

        assert_eq!(args.server.allowed_origins.len(), 2);
        let config = FridgeChefConfig::from(args);
        assert_eq!(config.detection.kind, DetectorKind::Http);
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        assert!(Args::try_parse_from(["fridgechef", "--max-results", "0"]).is_err());
        assert!(Args::try_parse_from(["fridgechef", "--fallback-pool", "0"]).is_err());
        assert!(Args::try_parse_from(["fridgechef", "--session-idle-ttl-secs", "0"]).is_err());

        let args = Args::try_parse_from(["fridgechef", "--max-results", "5"]).unwrap();
        assert_eq!(args.ranking.max_results, 5);
        assert_eq!(args.server.session_idle_ttl_secs, 1800);
    }
}
