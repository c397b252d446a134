use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

/// Normalized ingredient name: lowercase, whitespace runs replaced by `_`.
///
/// The normalized string is the identity of an ingredient across the catalog,
/// the selection set and recipe lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "bell_pepper")]
pub struct Ingredient(String);

impl Ingredient {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let normalized = raw
            .split(|c: char| c.is_whitespace() || c == '_')
            .filter(|part| !part.is_empty())
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("_");

        if normalized.is_empty() {
            return Err(CoreError::InvalidIngredient(raw.to_string()));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name sent to the recipe collaborator.
    pub fn query_name(&self) -> &str {
        &self.0
    }

    /// Human readable form, `bell_pepper` becomes `Bell Pepper`.
    pub fn display_name(&self) -> String {
        self.0
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Ingredient {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ingredient::parse(&value)
    }
}

impl From<Ingredient> for String {
    fn from(value: Ingredient) -> Self {
        value.0
    }
}

const DEFAULT_CATALOG: &[&str] = &[
    "chicken",
    "beef",
    "pork",
    "salmon",
    "egg",
    "milk",
    "cheese",
    "butter",
    "rice",
    "pasta",
    "potato",
    "tomato",
    "onion",
    "garlic",
    "carrot",
    "bell_pepper",
    "mushroom",
    "spinach",
    "broccoli",
    "lemon",
    "avocado",
    "apple",
];

/// Fixed, ordered set of ingredients offered as toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct IngredientCatalog {
    ingredients: Vec<Ingredient>,
}

impl IngredientCatalog {
    pub fn new(ingredients: Vec<Ingredient>) -> Self {
        let mut unique: Vec<Ingredient> = Vec::with_capacity(ingredients.len());
        for ingredient in ingredients {
            if !unique.contains(&ingredient) {
                unique.push(ingredient);
            }
        }
        Self {
            ingredients: unique,
        }
    }

    pub fn contains(&self, ingredient: &Ingredient) -> bool {
        self.ingredients.contains(ingredient)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter()
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

impl Default for IngredientCatalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_CATALOG
                .iter()
                .filter_map(|name| Ingredient::parse(name).ok())
                .collect(),
        )
    }
}
