use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::{
    domain::{
        common::{RecipeApiConfig, entities::app_errors::CoreError},
        ingredient::entities::Ingredient,
        recipe::{
            entities::{RecipeDetail, RecipeSummary},
            ports::RecipeLookup,
        },
    },
    infrastructure::recipe::mappers::{MealDetailModel, MealSummaryModel},
};

/// Client for the public TheMealDB JSON API.
#[derive(Debug, Clone)]
pub struct TheMealDbClient {
    base_url: String,
    client: Client,
}

impl TheMealDbClient {
    pub fn new(config: RecipeApiConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build recipe API client: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Fetches `{base_url}/{endpoint}?i={value}` and returns the `meals`
    /// array. A `null` or non-array `meals` field means no match.
    async fn fetch_meals<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        value: &str,
    ) -> Result<Vec<T>, CoreError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[("i", value)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Recipe API request failed: {}", e);
                CoreError::ExternalServiceError(format!("Recipe API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Recipe API error: {} on {}", status, endpoint);
            return Err(CoreError::ExternalServiceError(format!(
                "Recipe API returned error: {}",
                status
            )));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse recipe API response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse recipe API response: {}", e))
        })?;

        match body.get("meals") {
            Some(meals @ serde_json::Value::Array(_)) => serde_json::from_value(meals.clone())
                .map_err(|e| {
                    tracing::error!("Invalid meals format: {}", e);
                    CoreError::ExternalServiceError(format!("Invalid meals format: {}", e))
                }),
            _ => Ok(Vec::new()),
        }
    }
}

impl RecipeLookup for TheMealDbClient {
    #[instrument(skip(self), fields(ingredient = %ingredient))]
    async fn recipes_by_ingredient(
        &self,
        ingredient: Ingredient,
    ) -> Result<Vec<RecipeSummary>, CoreError> {
        let meals: Vec<MealSummaryModel> = self
            .fetch_meals("filter.php", ingredient.query_name())
            .await?;

        Ok(meals.into_iter().map(RecipeSummary::from).collect())
    }

    #[instrument(skip(self))]
    async fn recipe_by_id(&self, recipe_id: String) -> Result<Option<RecipeDetail>, CoreError> {
        let meals: Vec<MealDetailModel> = self.fetch_meals("lookup.php", &recipe_id).await?;

        Ok(meals.into_iter().next().map(RecipeDetail::from))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use super::*;

    fn client(server: &MockServer) -> TheMealDbClient {
        TheMealDbClient::new(RecipeApiConfig {
            base_url: format!("{}/", server.uri()),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_recipes_by_ingredient() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/filter.php"))
            .and(query_param("i", "chicken_breast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meals": [
                    { "idMeal": "1", "strMeal": "Pie", "strMealThumb": "https://img/1.jpg" },
                    { "idMeal": "2", "strMeal": "Soup", "strMealThumb": null }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let recipes = client(&server)
            .recipes_by_ingredient(Ingredient::parse("Chicken Breast").unwrap())
            .await
            .unwrap();

        assert_eq!(
            recipes,
            vec![
                RecipeSummary::new("1", "Pie", Some("https://img/1.jpg".to_string())),
                RecipeSummary::new("2", "Soup", None),
            ]
        );
    }

    #[tokio::test]
    async fn test_null_meals_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/filter.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "meals": null })))
            .mount(&server)
            .await;

        let recipes = client(&server)
            .recipes_by_ingredient(Ingredient::parse("kiwi").unwrap())
            .await
            .unwrap();

        assert!(recipes.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_external_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = client(&server)
            .recipes_by_ingredient(Ingredient::parse("rice").unwrap())
            .await;

        assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
    }

    #[tokio::test]
    async fn test_recipe_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lookup.php"))
            .and(query_param("i", "52772"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "meals": [{
                    "idMeal": "52772",
                    "strMeal": "Teriyaki Chicken Casserole",
                    "strArea": "Japanese",
                    "strCategory": "Chicken",
                    "strInstructions": "Bake.",
                    "strIngredient1": "soy sauce",
                    "strMeasure1": "3/4 cup"
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/lookup.php"))
            .and(query_param("i", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "meals": null })))
            .mount(&server)
            .await;

        let client = client(&server);
        let detail = client.recipe_by_id("52772".to_string()).await.unwrap().unwrap();
        assert_eq!(detail.name, "Teriyaki Chicken Casserole");
        assert_eq!(detail.ingredients.len(), 1);

        assert_eq!(client.recipe_by_id("0".to_string()).await.unwrap(), None);
    }
}
