use axum::extract::State;
use tracing::info;

use crate::application::http::{
    server::{api_entities::response::Response, app_state::AppState},
    session::handlers::get_session::{SessionResponse, SessionView},
};

#[utoipa::path(
    post,
    path = "",
    tag = "session",
    summary = "Start a session",
    description = "Creates an empty selection, capture and result state",
    responses(
        (status = 201, body = SessionResponse)
    ),
)]
pub async fn create_session(State(state): State<AppState>) -> Response<SessionResponse> {
    let session = state.sessions.create().await;
    info!(session_id = %session.id(), "Session created");

    Response::Created(SessionResponse {
        data: SessionView::from(&session),
    })
}
