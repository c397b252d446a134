use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::RankingSettings,
    ingredient::entities::Ingredient,
    recipe::entities::{RankedRecipe, RecipeSummary},
};

pub const DEFAULT_MAX_RESULTS: usize = 20;
pub const DEFAULT_FALLBACK_POOL: usize = 30;

/// Caps applied by the ranking engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingConfig {
    /// Candidates kept for detail resolution.
    pub max_results: usize,
    /// Candidates kept by the scored-union path before `max_results` applies.
    pub fallback_pool: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            fallback_pool: DEFAULT_FALLBACK_POOL,
        }
    }
}

impl From<RankingSettings> for RankingConfig {
    fn from(settings: RankingSettings) -> Self {
        Self {
            max_results: settings.max_results,
            fallback_pool: settings.fallback_pool,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RankingPath {
    /// Every candidate matches every selected ingredient.
    Intersection,
    /// Candidates ranked by the number of ingredients they match.
    ScoredUnion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub summary: RecipeSummary,
    /// Number of per-ingredient result lists containing the recipe.
    pub score: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCandidates {
    pub path: RankingPath,
    pub candidates: Vec<ScoredCandidate>,
}

#[derive(Debug, Clone)]
pub struct FindRecipesInput {
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeSearchOutcome {
    pub path: RankingPath,
    pub recipes: Vec<RankedRecipe>,
    /// Per-ingredient lookups that failed and were treated as empty.
    pub failed_lookups: usize,
    /// Entries whose detail lookup failed and which carry summary fields only.
    pub degraded: usize,
}

impl RecipeSearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
