use fridgechef_core::domain::{
    common::entities::app_errors::CoreError, ingredient::entities::Ingredient,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct SearchRecipesRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "ingredients must contain between 1 and 50 entries"
    ))]
    #[schema(example = json!(["chicken", "rice"]))]
    pub ingredients: Vec<String>,
}

impl SearchRecipesRequest {
    pub fn parse_ingredients(&self) -> Result<Vec<Ingredient>, CoreError> {
        self.ingredients
            .iter()
            .map(|name| Ingredient::parse(name))
            .collect()
    }
}
