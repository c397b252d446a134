use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;
use uuid::Uuid;

use crate::application::http::{
    server::{api_entities::api_error::ApiError, app_state::AppState},
    session::handlers::get_session::session_not_found,
};

#[utoipa::path(
    delete,
    path = "/{session_id}",
    tag = "session",
    summary = "End a session",
    params(
        ("session_id" = Uuid, Path, description = "Session id"),
    ),
    responses(
        (status = 204, description = "Session removed"),
        (status = 404, description = "Unknown session")
    ),
)]
pub async fn delete_session(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    if !state.sessions.remove(session_id).await {
        return Err(session_not_found(session_id));
    }

    info!(session_id = %session_id, "Session removed");
    Ok(StatusCode::NO_CONTENT)
}
