use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use fridgechef_core::domain::{
    ingredient::entities::Ingredient,
    recipe::{entities::RankedRecipe, value_objects::RankingPath},
    session::{Advisory, SessionState},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AdvisoryView {
    #[serde(flatten)]
    pub advisory: Advisory,
    pub message: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionView {
    pub id: Uuid,
    pub selected: Vec<Ingredient>,
    pub detected: Vec<Ingredient>,
    pub has_image: bool,
    pub results: Vec<RankedRecipe>,
    pub result_path: Option<RankingPath>,
    pub advisory: Option<AdvisoryView>,
    pub generation: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&SessionState> for SessionView {
    fn from(session: &SessionState) -> Self {
        Self {
            id: session.id(),
            selected: session.selected().to_vec(),
            detected: session.detected().to_vec(),
            has_image: session.captured_image().is_some(),
            results: session.results().to_vec(),
            result_path: session.result_path(),
            advisory: session.advisory().map(|advisory| AdvisoryView {
                advisory: advisory.clone(),
                message: advisory.message(),
            }),
            generation: session.generation(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub data: SessionView,
}

pub fn session_not_found(session_id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Session {} not found", session_id))
}

#[utoipa::path(
    get,
    path = "/{session_id}",
    tag = "session",
    summary = "Get session state",
    params(
        ("session_id" = Uuid, Path, description = "Session id"),
    ),
    responses(
        (status = 200, body = SessionResponse),
        (status = 404, description = "Unknown session")
    ),
)]
pub async fn get_session(
    Path(session_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<SessionResponse>, ApiError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| session_not_found(session_id))?;

    Ok(Response::OK(SessionResponse {
        data: SessionView::from(&session),
    }))
}
