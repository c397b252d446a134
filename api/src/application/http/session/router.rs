use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    capture_image::{__path_capture_image, capture_image},
    create_session::{__path_create_session, create_session},
    delete_session::{__path_delete_session, delete_session},
    detect_session_ingredients::{__path_detect_session_ingredients, detect_session_ingredients},
    get_session::{__path_get_session, get_session},
    search_session_recipes::{__path_search_session_recipes, search_session_recipes},
    toggle_ingredient::{__path_toggle_ingredient, toggle_ingredient},
};
use crate::application::http::{capture::CAPTURE_BODY_LIMIT, server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(
    create_session,
    get_session,
    delete_session,
    toggle_ingredient,
    capture_image,
    detect_session_ingredients,
    search_session_recipes
))]
pub struct SessionApiDoc;

pub fn session_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/sessions", state.args.server.root_path),
            post(create_session),
        )
        .route(
            &format!("{}/sessions/{{session_id}}", state.args.server.root_path),
            get(get_session).delete(delete_session),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/ingredients/{{ingredient}}",
                state.args.server.root_path
            ),
            post(toggle_ingredient),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/capture",
                state.args.server.root_path
            ),
            post(capture_image),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/detect",
                state.args.server.root_path
            ),
            post(detect_session_ingredients),
        )
        .route(
            &format!(
                "{}/sessions/{{session_id}}/search",
                state.args.server.root_path
            ),
            post(search_session_recipes),
        )
        .layer(DefaultBodyLimit::max(CAPTURE_BODY_LIMIT))
}
