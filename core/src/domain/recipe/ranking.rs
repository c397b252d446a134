use std::collections::{HashMap, HashSet};

use crate::domain::recipe::{
    entities::RecipeSummary,
    value_objects::{RankedCandidates, RankingConfig, RankingPath, ScoredCandidate},
};

/// Combines per-ingredient lookup results into one ranked candidate list.
///
/// `per_ingredient` holds one list per selected ingredient, in selection
/// order. When at least one recipe appears in every list, the result is that
/// intersection in the order of the first list. Otherwise every recipe is
/// scored by the number of lists it appears in and sorted by descending score,
/// ties keeping first-encounter order; that pool is capped at
/// `config.fallback_pool`. Either way the output holds at most
/// `config.max_results` unique recipes.
pub fn rank_candidates(
    per_ingredient: &[Vec<RecipeSummary>],
    config: &RankingConfig,
) -> RankedCandidates {
    let mut candidates = intersect(per_ingredient);
    let path = if candidates.is_empty() {
        candidates = scored_union(per_ingredient);
        candidates.truncate(config.fallback_pool);
        RankingPath::ScoredUnion
    } else {
        RankingPath::Intersection
    };

    candidates.truncate(config.max_results);

    RankedCandidates { path, candidates }
}

fn id_sets(per_ingredient: &[Vec<RecipeSummary>]) -> Vec<HashSet<&str>> {
    per_ingredient
        .iter()
        .map(|list| list.iter().map(|r| r.id.as_str()).collect())
        .collect()
}

fn intersect(per_ingredient: &[Vec<RecipeSummary>]) -> Vec<ScoredCandidate> {
    let Some(base) = per_ingredient.first() else {
        return Vec::new();
    };
    let sets = id_sets(per_ingredient);
    let score = per_ingredient.len();

    let mut seen = HashSet::new();
    base.iter()
        .filter(|recipe| sets.iter().all(|set| set.contains(recipe.id.as_str())))
        .filter(|recipe| seen.insert(recipe.id.as_str()))
        .map(|recipe| ScoredCandidate {
            summary: recipe.clone(),
            score,
        })
        .collect()
}

fn scored_union(per_ingredient: &[Vec<RecipeSummary>]) -> Vec<ScoredCandidate> {
    let mut order: Vec<ScoredCandidate> = Vec::new();
    let mut index_by_id: HashMap<&str, usize> = HashMap::new();

    for list in per_ingredient {
        let mut counted_in_list = HashSet::new();
        for recipe in list {
            if !counted_in_list.insert(recipe.id.as_str()) {
                continue;
            }
            match index_by_id.get(recipe.id.as_str()) {
                Some(&index) => order[index].score += 1,
                None => {
                    index_by_id.insert(recipe.id.as_str(), order.len());
                    order.push(ScoredCandidate {
                        summary: recipe.clone(),
                        score: 1,
                    });
                }
            }
        }
    }

    // stable: equal scores keep first-encounter order
    order.sort_by(|a, b| b.score.cmp(&a.score));
    order
}
