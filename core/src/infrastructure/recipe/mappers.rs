use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::recipe::entities::{
    MAX_RECIPE_INGREDIENTS, RecipeDetail, RecipeIngredient, RecipeSummary,
};

#[derive(Debug, Deserialize)]
pub struct MealSummaryModel {
    #[serde(rename = "idMeal")]
    pub id_meal: String,
    #[serde(rename = "strMeal")]
    pub str_meal: String,
    #[serde(rename = "strMealThumb")]
    pub str_meal_thumb: Option<String>,
}

/// Full meal record. Ingredients and measures arrive as numbered fields
/// `strIngredient1..=20` / `strMeasure1..=20` and are collected in `numbered`.
#[derive(Debug, Deserialize)]
pub struct MealDetailModel {
    #[serde(rename = "idMeal")]
    pub id_meal: String,
    #[serde(rename = "strMeal")]
    pub str_meal: String,
    #[serde(rename = "strMealThumb")]
    pub str_meal_thumb: Option<String>,
    #[serde(rename = "strArea")]
    pub str_area: Option<String>,
    #[serde(rename = "strCategory")]
    pub str_category: Option<String>,
    #[serde(rename = "strInstructions")]
    pub str_instructions: Option<String>,
    #[serde(rename = "strSource")]
    pub str_source: Option<String>,
    #[serde(flatten)]
    pub numbered: HashMap<String, serde_json::Value>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl MealDetailModel {
    fn numbered_text(&self, field: &str, index: usize) -> Option<String> {
        non_empty(
            self.numbered
                .get(&format!("{field}{index}"))
                .and_then(|v| v.as_str()),
        )
    }

    fn ingredient_pairs(&self) -> Vec<RecipeIngredient> {
        (1..=MAX_RECIPE_INGREDIENTS)
            .filter_map(|index| {
                let name = self.numbered_text("strIngredient", index)?;
                let measure = self
                    .numbered_text("strMeasure", index)
                    .unwrap_or_default();
                Some(RecipeIngredient { name, measure })
            })
            .collect()
    }
}

impl From<MealSummaryModel> for RecipeSummary {
    fn from(model: MealSummaryModel) -> Self {
        Self {
            id: model.id_meal,
            name: model.str_meal,
            thumbnail: non_empty(model.str_meal_thumb.as_deref()),
        }
    }
}

impl From<MealDetailModel> for RecipeDetail {
    fn from(model: MealDetailModel) -> Self {
        let ingredients = model.ingredient_pairs();

        Self {
            ingredients,
            id: model.id_meal,
            name: model.str_meal,
            thumbnail: non_empty(model.str_meal_thumb.as_deref()),
            area: non_empty(model.str_area.as_deref()),
            category: non_empty(model.str_category.as_deref()),
            instructions: model.str_instructions.unwrap_or_default().trim().to_string(),
            source: non_empty(model.str_source.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_detail_collects_numbered_pairs_in_order() {
        let model: MealDetailModel = serde_json::from_value(json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strMealThumb": "https://img/teriyaki.jpg",
            "strArea": "Japanese",
            "strCategory": "Chicken",
            "strInstructions": "  Preheat oven.  ",
            "strSource": "",
            "strIngredient1": "soy sauce",
            "strMeasure1": "3/4 cup",
            "strIngredient2": "water",
            "strMeasure2": null,
            "strIngredient3": "",
            "strMeasure3": " ",
            "strIngredient4": "brown sugar",
            "strMeasure4": "1/2 cup",
            "strIngredient20": null,
            "dateModified": null
        }))
        .unwrap();

        let detail = RecipeDetail::from(model);

        assert_eq!(detail.id, "52772");
        assert_eq!(detail.area.as_deref(), Some("Japanese"));
        assert_eq!(detail.instructions, "Preheat oven.");
        assert_eq!(detail.source, None);
        assert_eq!(
            detail.ingredients,
            vec![
                RecipeIngredient {
                    name: "soy sauce".to_string(),
                    measure: "3/4 cup".to_string()
                },
                RecipeIngredient {
                    name: "water".to_string(),
                    measure: String::new()
                },
                RecipeIngredient {
                    name: "brown sugar".to_string(),
                    measure: "1/2 cup".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_pairs_beyond_twenty_are_ignored() {
        let model: MealDetailModel = serde_json::from_value(json!({
            "idMeal": "1",
            "strMeal": "Long",
            "strIngredient21": "saffron",
            "strMeasure21": "a pinch"
        }))
        .unwrap();

        assert!(RecipeDetail::from(model).ingredients.is_empty());
    }
}
