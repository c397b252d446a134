use futures::future::join_all;
use tracing::{info, instrument, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    detection::ports::IngredientDetector,
    ingredient::value_objects::SelectedIngredients,
    recipe::{
        entities::{RankedRecipe, RecipeDetail, RecipeSummary},
        ports::{RecipeLookup, RecipeService},
        ranking::rank_candidates,
        value_objects::{FindRecipesInput, RecipeSearchOutcome},
    },
};

impl<RL, D> RecipeService for Service<RL, D>
where
    RL: RecipeLookup,
    D: IngredientDetector,
{
    #[instrument(skip(self, input), fields(ingredients = input.ingredients.len()))]
    async fn find_recipes(&self, input: FindRecipesInput) -> Result<RecipeSearchOutcome, CoreError> {
        // 1. Validate selection before touching the collaborator
        if input.ingredients.is_empty() {
            return Err(CoreError::NoSelection);
        }
        let ingredients = input
            .ingredients
            .into_iter()
            .collect::<SelectedIngredients>()
            .to_vec();

        // 2. One lookup per ingredient, all awaited together
        let lookups = join_all(
            ingredients
                .iter()
                .map(|ingredient| self.recipe_lookup.recipes_by_ingredient(ingredient.clone())),
        )
        .await;

        let mut failed_lookups = 0;
        let per_ingredient: Vec<Vec<RecipeSummary>> = ingredients
            .iter()
            .zip(lookups)
            .map(|(ingredient, result)| match result {
                Ok(recipes) => recipes,
                Err(e) => {
                    failed_lookups += 1;
                    warn!(ingredient = %ingredient, error = %e, "Recipe lookup failed, treating as empty");
                    Vec::new()
                }
            })
            .collect();

        // 3. Intersection or scored union, capped
        let ranked = rank_candidates(&per_ingredient, &self.ranking);

        // 4. Resolve details for the retained candidates only
        let details = join_all(
            ranked
                .candidates
                .iter()
                .map(|candidate| self.recipe_lookup.recipe_by_id(candidate.summary.id.clone())),
        )
        .await;

        let mut degraded = 0;
        let recipes: Vec<RankedRecipe> = ranked
            .candidates
            .into_iter()
            .zip(details)
            .map(|(candidate, detail)| match detail {
                Ok(Some(detail)) => RankedRecipe::Detailed(detail),
                Ok(None) => {
                    degraded += 1;
                    warn!(recipe_id = %candidate.summary.id, "Recipe detail missing, keeping summary");
                    RankedRecipe::Summary(candidate.summary)
                }
                Err(e) => {
                    degraded += 1;
                    warn!(recipe_id = %candidate.summary.id, error = %e, "Recipe detail lookup failed, keeping summary");
                    RankedRecipe::Summary(candidate.summary)
                }
            })
            .collect();

        info!(
            path = ?ranked.path,
            results = recipes.len(),
            failed_lookups,
            degraded,
            "Recipe search completed"
        );

        Ok(RecipeSearchOutcome {
            path: ranked.path,
            recipes,
            failed_lookups,
            degraded,
        })
    }

    #[instrument(skip(self))]
    async fn get_recipe(&self, recipe_id: String) -> Result<RecipeDetail, CoreError> {
        self.recipe_lookup
            .recipe_by_id(recipe_id)
            .await?
            .ok_or(CoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::domain::{
        capture::FrameEncoder,
        detection::ports::MockIngredientDetector,
        ingredient::entities::Ingredient,
        recipe::{
            entities::RecipeIngredient,
            ports::MockRecipeLookup,
            value_objects::{RankingConfig, RankingPath},
        },
    };

    fn summaries(ids: &[&str]) -> Vec<RecipeSummary> {
        ids.iter()
            .map(|id| RecipeSummary::new(*id, format!("Recipe {id}"), None))
            .collect()
    }

    fn detail(id: &str) -> RecipeDetail {
        RecipeDetail {
            id: id.to_string(),
            name: format!("Recipe {id}"),
            thumbnail: None,
            area: Some("British".to_string()),
            category: Some("Main".to_string()),
            ingredients: vec![RecipeIngredient {
                name: "Rice".to_string(),
                measure: "1 cup".to_string(),
            }],
            instructions: "Cook it.".to_string(),
            source: None,
        }
    }

    fn ingredients(names: &[&str]) -> Vec<Ingredient> {
        names.iter().map(|n| Ingredient::parse(n).unwrap()).collect()
    }

    fn service(lookup: MockRecipeLookup) -> Service<MockRecipeLookup, MockIngredientDetector> {
        Service::new(
            lookup,
            MockIngredientDetector::new(),
            RankingConfig::default(),
            FrameEncoder::default(),
        )
    }

    fn lookup_with(lists: Vec<(&'static str, Vec<RecipeSummary>)>) -> MockRecipeLookup {
        let mut lookup = MockRecipeLookup::new();
        lookup
            .expect_recipes_by_ingredient()
            .returning(move |ingredient| {
                let found = lists
                    .iter()
                    .find(|(name, _)| *name == ingredient.as_str())
                    .map(|(_, list)| list.clone())
                    .unwrap_or_default();
                Box::pin(async move { Ok(found) })
            });
        lookup
    }

    #[tokio::test]
    async fn test_find_recipes_intersection() {
        let mut lookup = lookup_with(vec![
            ("chicken", summaries(&["A", "B", "C"])),
            ("rice", summaries(&["B", "C", "D"])),
        ]);
        lookup
            .expect_recipe_by_id()
            .times(2)
            .returning(|id| Box::pin(async move { Ok(Some(detail(&id))) }));

        let outcome = service(lookup)
            .find_recipes(FindRecipesInput {
                ingredients: ingredients(&["chicken", "rice"]),
            })
            .await
            .unwrap();

        assert_eq!(outcome.path, RankingPath::Intersection);
        let ids: Vec<_> = outcome.recipes.iter().map(RankedRecipe::id).collect();
        assert_eq!(ids, vec!["B", "C"]);
        assert_eq!(outcome.degraded, 0);
        assert!(outcome.recipes.iter().all(|r| !r.is_degraded()));
    }

    #[tokio::test]
    async fn test_find_recipes_falls_back_when_one_lookup_is_empty() {
        let mut lookup = lookup_with(vec![("avocado", summaries(&["X"])), ("kiwi", vec![])]);
        lookup
            .expect_recipe_by_id()
            .returning(|id| Box::pin(async move { Ok(Some(detail(&id))) }));

        let outcome = service(lookup)
            .find_recipes(FindRecipesInput {
                ingredients: ingredients(&["avocado", "kiwi"]),
            })
            .await
            .unwrap();

        assert_eq!(outcome.path, RankingPath::ScoredUnion);
        let ids: Vec<_> = outcome.recipes.iter().map(RankedRecipe::id).collect();
        assert_eq!(ids, vec!["X"]);
    }

    #[tokio::test]
    async fn test_empty_selection_issues_no_lookup() {
        let mut lookup = MockRecipeLookup::new();
        lookup.expect_recipes_by_ingredient().never();
        lookup.expect_recipe_by_id().never();

        let result = service(lookup)
            .find_recipes(FindRecipesInput {
                ingredients: vec![],
            })
            .await;

        assert_eq!(result, Err(CoreError::NoSelection));
    }

    #[tokio::test]
    async fn test_failed_lookup_is_absorbed() {
        let mut lookup = MockRecipeLookup::new();
        lookup
            .expect_recipes_by_ingredient()
            .returning(|ingredient| {
                let result = if ingredient.as_str() == "chicken" {
                    Ok(summaries(&["A", "B"]))
                } else {
                    Err(CoreError::ExternalServiceError("timeout".to_string()))
                };
                Box::pin(async move { result })
            });
        lookup
            .expect_recipe_by_id()
            .returning(|id| Box::pin(async move { Ok(Some(detail(&id))) }));

        let outcome = service(lookup)
            .find_recipes(FindRecipesInput {
                ingredients: ingredients(&["chicken", "rice"]),
            })
            .await
            .unwrap();

        assert_eq!(outcome.failed_lookups, 1);
        assert_eq!(outcome.path, RankingPath::ScoredUnion);
        assert_eq!(outcome.recipes.len(), 2);
    }

    #[tokio::test]
    async fn test_all_lookups_failing_yields_empty_outcome() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut lookup = MockRecipeLookup::new();
        lookup.expect_recipes_by_ingredient().returning(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Box::pin(async { Err(CoreError::ExternalServiceError("down".to_string())) })
        });
        lookup.expect_recipe_by_id().never();

        let outcome = service(lookup)
            .find_recipes(FindRecipesInput {
                ingredients: ingredients(&["chicken", "rice", "egg"]),
            })
            .await
            .unwrap();

        assert!(outcome.is_empty());
        assert_eq!(outcome.failed_lookups, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failed_detail_keeps_summary() {
        let mut lookup = lookup_with(vec![("egg", summaries(&["A", "B"]))]);
        lookup.expect_recipe_by_id().returning(|id| {
            let result = if id == "A" {
                Ok(Some(detail(&id)))
            } else {
                Err(CoreError::ExternalServiceError("boom".to_string()))
            };
            Box::pin(async move { result })
        });

        let outcome = service(lookup)
            .find_recipes(FindRecipesInput {
                ingredients: ingredients(&["egg"]),
            })
            .await
            .unwrap();

        assert_eq!(outcome.recipes.len(), 2);
        assert!(!outcome.recipes[0].is_degraded());
        assert_eq!(
            outcome.recipes[1],
            RankedRecipe::Summary(RecipeSummary::new("B", "Recipe B", None))
        );
        assert_eq!(outcome.degraded, 1);
    }

    #[tokio::test]
    async fn test_detail_resolution_is_capped() {
        let many: Vec<String> = (0..50).map(|i| format!("id{i}")).collect();
        let many: Vec<&str> = many.iter().map(String::as_str).collect();
        let mut lookup = lookup_with(vec![("rice", summaries(&many))]);
        lookup
            .expect_recipe_by_id()
            .times(20)
            .returning(|id| Box::pin(async move { Ok(Some(detail(&id))) }));

        let outcome = service(lookup)
            .find_recipes(FindRecipesInput {
                ingredients: ingredients(&["rice"]),
            })
            .await
            .unwrap();

        assert_eq!(outcome.recipes.len(), 20);
    }

    #[tokio::test]
    async fn test_duplicate_ingredients_are_looked_up_once() {
        let mut lookup = MockRecipeLookup::new();
        lookup
            .expect_recipes_by_ingredient()
            .times(1)
            .returning(|_| Box::pin(async { Ok(summaries(&["A"])) }));
        lookup
            .expect_recipe_by_id()
            .returning(|id| Box::pin(async move { Ok(Some(detail(&id))) }));

        let outcome = service(lookup)
            .find_recipes(FindRecipesInput {
                ingredients: ingredients(&["Rice", "rice"]),
            })
            .await
            .unwrap();

        assert_eq!(outcome.recipes.len(), 1);
    }

    #[tokio::test]
    async fn test_get_recipe_not_found() {
        let mut lookup = MockRecipeLookup::new();
        lookup
            .expect_recipe_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));

        let result = service(lookup).get_recipe("404".to_string()).await;

        assert_eq!(result, Err(CoreError::NotFound));
    }
}
