use axum::extract::State;
use fridgechef_core::domain::ingredient::entities::Ingredient;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IngredientView {
    pub name: Ingredient,
    pub display_name: String,
}

impl From<&Ingredient> for IngredientView {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.clone(),
            display_name: ingredient.display_name(),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GetCatalogResponse {
    pub data: Vec<IngredientView>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "ingredient",
    summary = "List known ingredients",
    description = "Returns the fixed, ordered ingredient catalog used to render toggles",
    responses(
        (status = 200, body = GetCatalogResponse)
    ),
)]
pub async fn get_catalog(State(state): State<AppState>) -> Response<GetCatalogResponse> {
    Response::OK(GetCatalogResponse {
        data: state.catalog.iter().map(IngredientView::from).collect(),
    })
}
