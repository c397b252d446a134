use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum number of (ingredient, measure) pairs carried by a recipe.
pub const MAX_RECIPE_INGREDIENTS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
}

impl RecipeSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>, thumbnail: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeIngredient {
    pub name: String,
    pub measure: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
    pub area: Option<String>,
    pub category: Option<String>,
    /// Ordered, at most [`MAX_RECIPE_INGREDIENTS`] entries.
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: String,
    pub source: Option<String>,
}

/// A ranked entry. `Summary` is the degraded form kept when the detail lookup
/// failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RankedRecipe {
    Detailed(RecipeDetail),
    Summary(RecipeSummary),
}

impl RankedRecipe {
    pub fn id(&self) -> &str {
        match self {
            RankedRecipe::Detailed(detail) => &detail.id,
            RankedRecipe::Summary(summary) => &summary.id,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, RankedRecipe::Summary(_))
    }
}
