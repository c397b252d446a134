use axum::extract::{Path, State};
use fridgechef_core::domain::detection::ports::DetectionService;
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
    path = "/{session_id}/detect",
    tag = "session",
    summary = "Detect ingredients in the captured photo",
    description = "Merges suggestions into the selection. A detection failure keeps the selection and records an advisory instead of failing the request.",
    params(
        ("session_id" = Uuid, Path, description = "Session id"),
    ),
    responses(
        (status = 200, body = SessionResponse),
        (status = 400, description = "No captured image"),
        (status = 404, description = "Unknown session")
    ),
)]
pub async fn detect_session_ingredients(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<SessionResponse>, ApiError> {
    let image = state
        .sessions
        .update(session_id, |session| session.detection_input())
        .await
        .ok_or_else(|| session_not_found(session_id))??;

    let detected = state.service.detect_ingredients(image).await;

    let view = state
        .sessions
        .update(session_id, |session| {
            session.merge_detection(detected);
            SessionView::from(&*session)
        })
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    Ok(Response::OK(SessionResponse { data: view }))
}
