use axum::extract::State;
use fridgechef_core::domain::{
    recipe::{
        ports::RecipeService,
        value_objects::{FindRecipesInput, RecipeSearchOutcome},
    },
    session::Advisory,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    recipe::validators::SearchRecipesRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchRecipesResponse {
    pub data: RecipeSearchOutcome,
    pub advisory: Option<Advisory>,
    pub message: Option<String>,
}

impl From<RecipeSearchOutcome> for SearchRecipesResponse {
    fn from(outcome: RecipeSearchOutcome) -> Self {
        let advisory = Advisory::for_outcome(&outcome);

        Self {
            message: advisory.as_ref().map(Advisory::message),
            advisory,
            data: outcome,
        }
    }
}

#[utoipa::path(
    post,
    path = "/search",
    tag = "recipe",
    summary = "Find recipes for a set of ingredients",
    description = "Looks up recipes per ingredient, keeps those matching every ingredient or ranks by match count, and resolves up to the configured number of details",
    request_body = SearchRecipesRequest,
    responses(
        (status = 200, body = SearchRecipesResponse),
        (status = 400, description = "Empty or invalid ingredient selection")
    ),
)]
pub async fn search_recipes(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<SearchRecipesRequest>,
) -> Result<Response<SearchRecipesResponse>, ApiError> {
    let ingredients = payload.parse_ingredients()?;

    let outcome = state
        .service
        .find_recipes(FindRecipesInput { ingredients })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SearchRecipesResponse::from(outcome)))
}
