use axum::extract::{Path, Request, State};
use fridgechef_core::domain::capture::ports::CaptureService;
use tracing::debug;
use uuid::Uuid;

use crate::application::http::{
    capture::{CaptureRequest, read_capture_request},
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    session::handlers::get_session::{SessionResponse, SessionView, session_not_found},
};

#[utoipa::path(
    post,
    path = "/{session_id}/capture",
    tag = "session",
    summary = "Store a captured photo",
    description = "Accepts a JSON `{ \"image\": \"<data uri>\" }` body, or a multipart form with an `image` upload, a `data_uri` field, or a raw RGBA `frame` with `width`/`height`. Replaces any previous capture.",
    request_body(content = CaptureRequest, content_type = "application/json"),
    params(
        ("session_id" = Uuid, Path, description = "Session id"),
    ),
    responses(
        (status = 200, body = SessionResponse),
        (status = 400, description = "No or invalid image"),
        (status = 404, description = "Unknown session"),
        (status = 413, description = "Image too large")
    ),
)]
pub async fn capture_image(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
    request: Request,
) -> Result<Response<SessionResponse>, ApiError> {
    if state.sessions.get(session_id).await.is_none() {
        return Err(session_not_found(session_id));
    }

    let source = read_capture_request(request, &state).await?;
    let image = state.service.capture_image(source)?;
    debug!(session_id = %session_id, mime_type = %image.mime_type, size = image.len(), "Image captured");

    let view = state
        .sessions
        .update(session_id, |session| {
            session.set_capture(image);
            SessionView::from(&*session)
        })
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    Ok(Response::OK(SessionResponse { data: view }))
}
