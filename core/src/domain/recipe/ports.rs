use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ingredient::entities::Ingredient,
    recipe::{
        entities::{RecipeDetail, RecipeSummary},
        value_objects::{FindRecipesInput, RecipeSearchOutcome},
    },
};

/// Read-only recipe collaborator.
#[cfg_attr(test, mockall::automock)]
pub trait RecipeLookup: Send + Sync {
    /// Recipes containing `ingredient`. No match is an empty list.
    fn recipes_by_ingredient(
        &self,
        ingredient: Ingredient,
    ) -> impl Future<Output = Result<Vec<RecipeSummary>, CoreError>> + Send;

    fn recipe_by_id(
        &self,
        recipe_id: String,
    ) -> impl Future<Output = Result<Option<RecipeDetail>, CoreError>> + Send;
}

/// Service trait for recipe aggregation
pub trait RecipeService: Send + Sync {
    fn find_recipes(
        &self,
        input: FindRecipesInput,
    ) -> impl Future<Output = Result<RecipeSearchOutcome, CoreError>> + Send;

    fn get_recipe(
        &self,
        recipe_id: String,
    ) -> impl Future<Output = Result<RecipeDetail, CoreError>> + Send;
}
