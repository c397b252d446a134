use axum::extract::{Path, State};
use fridgechef_core::domain::recipe::{ports::RecipeService, value_objects::FindRecipesInput};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::{
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    session::handlers::get_session::{SessionView, session_not_found},
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchSessionRecipesResponse {
    pub data: SessionView,
    /// False when a newer search started meanwhile and these results were dropped.
    pub applied: bool,
}

#[utoipa::path(
    post,
    path = "/{session_id}/search",
    tag = "session",
    summary = "Find recipes for the session selection",
    description = "Results are published only if no newer search was started for the session in the meantime",
    params(
        ("session_id" = Uuid, Path, description = "Session id"),
    ),
    responses(
        (status = 200, body = SearchSessionRecipesResponse),
        (status = 400, description = "Empty selection"),
        (status = 404, description = "Unknown session")
    ),
)]
pub async fn search_session_recipes(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<SearchSessionRecipesResponse>, ApiError> {
    let (ticket, ingredients) = state
        .sessions
        .update(session_id, |session| session.begin_search())
        .await
        .ok_or_else(|| session_not_found(session_id))??;

    let outcome = state
        .service
        .find_recipes(FindRecipesInput { ingredients })
        .await
        .map_err(ApiError::from)?;

    let (applied, view) = state
        .sessions
        .update(session_id, |session| {
            let applied = session.apply_search(ticket, outcome);
            (applied, SessionView::from(&*session))
        })
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    Ok(Response::OK(SearchSessionRecipesResponse {
        data: view,
        applied,
    }))
}
