use axum::extract::{Path, State};
use fridgechef_core::domain::ingredient::entities::Ingredient;
use uuid::Uuid;

use crate::application::http::{
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    session::handlers::get_session::{SessionResponse, SessionView, session_not_found},
};

#[utoipa::path(
    post,
    path = "/{session_id}/ingredients/{ingredient}",
    tag = "session",
    summary = "Toggle an ingredient",
    description = "Selects the ingredient, or deselects it when already selected",
    params(
        ("session_id" = Uuid, Path, description = "Session id"),
        ("ingredient" = String, Path, description = "Ingredient name, normalized before use"),
    ),
    responses(
        (status = 200, body = SessionResponse),
        (status = 400, description = "Blank ingredient name"),
        (status = 404, description = "Unknown session")
    ),
)]
pub async fn toggle_ingredient(
    Path((session_id, ingredient)): Path<(Uuid, String)>,
    State(state): State<AppState>,
) -> Result<Response<SessionResponse>, ApiError> {
    let ingredient = Ingredient::parse(&ingredient)?;

    let view = state
        .sessions
        .update(session_id, |session| {
            session.toggle(ingredient);
            SessionView::from(&*session)
        })
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    Ok(Response::OK(SessionResponse { data: view }))
}
