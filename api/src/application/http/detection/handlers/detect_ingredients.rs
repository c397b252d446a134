use axum::extract::{Request, State};
use fridgechef_core::domain::{
    capture::ports::CaptureService, detection::ports::DetectionService,
    ingredient::entities::Ingredient,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    capture::{CaptureRequest, read_capture_request},
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DetectIngredientsResponse {
    pub ingredients: Vec<Ingredient>,
}

#[utoipa::path(
    post,
    path = "",
    tag = "detection",
    summary = "Detect ingredients in a photo",
    description = "Accepts a JSON `{ \"image\": \"<data uri>\" }` body, or a multipart form with an `image` upload, a `data_uri` field, or a raw RGBA `frame` with `width`/`height`. Returns suggested ingredient names.",
    request_body(content = CaptureRequest, content_type = "application/json"),
    responses(
        (status = 200, body = DetectIngredientsResponse),
        (status = 400, description = "No image in the form"),
        (status = 413, description = "Image too large"),
        (status = 502, description = "Detection collaborator unavailable")
    ),
)]
pub async fn detect_ingredients(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response<DetectIngredientsResponse>, ApiError> {
    let source = read_capture_request(request, &state).await?;
    let image = state.service.capture_image(source)?;

    let ingredients = state
        .service
        .detect_ingredients(image)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DetectIngredientsResponse { ingredients }))
}
