use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

use super::handlers::detect_ingredients::{__path_detect_ingredients, detect_ingredients};
use crate::application::http::{capture::CAPTURE_BODY_LIMIT, server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(detect_ingredients))]
pub struct DetectionApiDoc;

pub fn detection_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/detect", state.args.server.root_path),
            post(detect_ingredients),
        )
        .layer(DefaultBodyLimit::max(CAPTURE_BODY_LIMIT))
}
