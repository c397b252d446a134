use axum::extract::{Path, State};
use fridgechef_core::domain::recipe::{entities::RecipeDetail, ports::RecipeService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GetRecipeResponse {
    pub data: RecipeDetail,
}

#[utoipa::path(
    get,
    path = "/{recipe_id}",
    tag = "recipe",
    summary = "Get recipe detail",
    params(
        ("recipe_id" = String, Path, description = "Recipe identifier"),
    ),
    responses(
        (status = 200, body = GetRecipeResponse),
        (status = 404, description = "Unknown recipe")
    ),
)]
pub async fn get_recipe(
    Path(recipe_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<GetRecipeResponse>, ApiError> {
    let recipe = state
        .service
        .get_recipe(recipe_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetRecipeResponse { data: recipe }))
}
