use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::get_catalog::{__path_get_catalog, get_catalog};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_catalog))]
pub struct IngredientApiDoc;

pub fn ingredient_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/ingredients", state.args.server.root_path),
        get(get_catalog),
    )
}
