use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    capture::entities::{CaptureSlot, CapturedImage},
    common::{entities::app_errors::CoreError, generate_timestamp},
    ingredient::{entities::Ingredient, value_objects::SelectedIngredients},
    recipe::{
        entities::RankedRecipe,
        value_objects::{RankingPath, RecipeSearchOutcome},
    },
};

/// Short, user-facing message about a recoverable condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    NoSelection,
    NoImage,
    DetectionUnavailable,
    NoRecipesFound,
    PartialResults { failed: usize },
}

impl Advisory {
    /// The advisory a finished search should surface, if any.
    pub fn for_outcome(outcome: &RecipeSearchOutcome) -> Option<Advisory> {
        if outcome.is_empty() {
            Some(Advisory::NoRecipesFound)
        } else if outcome.failed_lookups > 0 {
            Some(Advisory::PartialResults {
                failed: outcome.failed_lookups,
            })
        } else {
            None
        }
    }

    pub fn message(&self) -> String {
        match self {
            Advisory::NoSelection => "Select at least one ingredient first.".to_string(),
            Advisory::NoImage => "Take or upload a photo first.".to_string(),
            Advisory::DetectionUnavailable => {
                "Could not detect ingredients right now. You can still pick them by hand."
                    .to_string()
            }
            Advisory::NoRecipesFound => "No recipes found for these ingredients.".to_string(),
            Advisory::PartialResults { failed } => format!(
                "Some ingredient lookups failed ({}), results may be incomplete.",
                failed
            ),
        }
    }
}

/// Token identifying one search run. Only the latest one may publish results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Per-user state owned by the presentation layer.
#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    selected: SelectedIngredients,
    detected: Vec<Ingredient>,
    captured: CaptureSlot,
    results: Vec<RankedRecipe>,
    result_path: Option<RankingPath>,
    advisory: Option<Advisory>,
    generation: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            selected: SelectedIngredients::new(),
            detected: Vec::new(),
            captured: CaptureSlot::new(),
            results: Vec::new(),
            result_path: None,
            advisory: None,
            generation: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn selected(&self) -> &SelectedIngredients {
        &self.selected
    }

    pub fn detected(&self) -> &[Ingredient] {
        &self.detected
    }

    pub fn captured_image(&self) -> Option<&CapturedImage> {
        self.captured.current()
    }

    pub fn results(&self) -> &[RankedRecipe] {
        &self.results
    }

    pub fn result_path(&self) -> Option<RankingPath> {
        self.result_path
    }

    pub fn advisory(&self) -> Option<&Advisory> {
        self.advisory.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn toggle(&mut self, ingredient: Ingredient) -> bool {
        self.touch();
        self.selected.toggle(ingredient)
    }

    pub fn record_advisory(&mut self, advisory: Advisory) {
        self.touch();
        self.advisory = Some(advisory);
    }

    /// Stores a new capture, dropping the previous one.
    pub fn set_capture(&mut self, image: CapturedImage) -> Option<CapturedImage> {
        self.touch();
        self.captured.replace(image)
    }

    /// The image to send for detection, or a recorded `NoImage` advisory.
    pub fn detection_input(&mut self) -> Result<CapturedImage, CoreError> {
        match self.captured.current() {
            Some(image) => Ok(image.clone()),
            None => {
                self.record_advisory(Advisory::NoImage);
                Err(CoreError::NoImage)
            }
        }
    }

    /// Merges a detection result by union. A failed detection leaves the
    /// selection untouched and records an advisory. Returns the number of
    /// newly selected ingredients.
    pub fn merge_detection(&mut self, result: Result<Vec<Ingredient>, CoreError>) -> usize {
        self.touch();
        match result {
            Ok(ingredients) => {
                self.detected = ingredients.clone();
                self.advisory = None;
                self.selected.merge(ingredients)
            }
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "Ingredient detection failed");
                self.advisory = Some(Advisory::DetectionUnavailable);
                0
            }
        }
    }

    /// Starts a search run for the current selection.
    pub fn begin_search(&mut self) -> Result<(SearchTicket, Vec<Ingredient>), CoreError> {
        if self.selected.is_empty() {
            self.record_advisory(Advisory::NoSelection);
            return Err(CoreError::NoSelection);
        }

        self.touch();
        self.generation += 1;
        Ok((SearchTicket(self.generation), self.selected.to_vec()))
    }

    /// Publishes `outcome` if `ticket` belongs to the latest run.
    pub fn apply_search(&mut self, ticket: SearchTicket, outcome: RecipeSearchOutcome) -> bool {
        if ticket.0 != self.generation {
            debug!(
                session_id = %self.id,
                ticket = ticket.0,
                latest = self.generation,
                "Dropping stale search results"
            );
            return false;
        }

        self.touch();
        self.advisory = Advisory::for_outcome(&outcome);
        self.result_path = Some(outcome.path);
        self.results = outcome.recipes;
        true
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::entities::RecipeSummary;

    fn ingredient(name: &str) -> Ingredient {
        Ingredient::parse(name).unwrap()
    }

    fn outcome(ids: &[&str]) -> RecipeSearchOutcome {
        RecipeSearchOutcome {
            path: RankingPath::Intersection,
            recipes: ids
                .iter()
                .map(|id| RankedRecipe::Summary(RecipeSummary::new(*id, *id, None)))
                .collect(),
            failed_lookups: 0,
            degraded: ids.len(),
        }
    }

    #[test]
    fn test_begin_search_requires_selection() {
        let mut session = SessionState::new();

        assert_eq!(session.begin_search(), Err(CoreError::NoSelection));
        assert_eq!(session.advisory(), Some(&Advisory::NoSelection));
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn test_stale_search_is_dropped() {
        let mut session = SessionState::new();
        session.toggle(ingredient("rice"));

        let (first, _) = session.begin_search().unwrap();
        let (second, selection) = session.begin_search().unwrap();
        assert_eq!(selection, vec![ingredient("rice")]);

        assert!(session.apply_search(second, outcome(&["new"])));
        assert!(!session.apply_search(first, outcome(&["old"])));

        assert_eq!(session.results().len(), 1);
        assert_eq!(session.results()[0].id(), "new");
    }

    #[test]
    fn test_empty_outcome_records_no_recipes_found() {
        let mut session = SessionState::new();
        session.toggle(ingredient("kiwi"));
        let (ticket, _) = session.begin_search().unwrap();

        session.apply_search(ticket, outcome(&[]));

        assert_eq!(session.advisory(), Some(&Advisory::NoRecipesFound));
        assert_ne!(
            Advisory::NoRecipesFound.message(),
            Advisory::NoSelection.message()
        );
    }

    #[test]
    fn test_partial_results_advisory() {
        let mut session = SessionState::new();
        session.toggle(ingredient("egg"));
        let (ticket, _) = session.begin_search().unwrap();
        let mut partial = outcome(&["A"]);
        partial.failed_lookups = 1;

        session.apply_search(ticket, partial);

        assert_eq!(
            session.advisory(),
            Some(&Advisory::PartialResults { failed: 1 })
        );
    }

    #[test]
    fn test_advisory_for_outcome() {
        let mut failed = outcome(&[]);
        failed.failed_lookups = 2;
        assert_eq!(
            Advisory::for_outcome(&failed),
            Some(Advisory::NoRecipesFound)
        );

        let mut partial = outcome(&["A"]);
        partial.failed_lookups = 1;
        assert_eq!(
            Advisory::for_outcome(&partial),
            Some(Advisory::PartialResults { failed: 1 })
        );

        assert_eq!(Advisory::for_outcome(&outcome(&["A"])), None);
    }

    #[test]
    fn test_failed_detection_keeps_selection() {
        let mut session = SessionState::new();
        session.toggle(ingredient("rice"));
        let before = session.selected().clone();

        let added = session.merge_detection(Err(CoreError::ExternalServiceError(
            "500".to_string(),
        )));

        assert_eq!(added, 0);
        assert_eq!(session.selected(), &before);
        assert_eq!(session.advisory(), Some(&Advisory::DetectionUnavailable));
    }

    #[test]
    fn test_detection_merges_by_union() {
        let mut session = SessionState::new();
        session.toggle(ingredient("rice"));

        let added = session.merge_detection(Ok(vec![ingredient("egg"), ingredient("rice")]));

        assert_eq!(added, 1);
        assert!(session.selected().contains(&ingredient("rice")));
        assert!(session.selected().contains(&ingredient("egg")));
        assert_eq!(session.detected().len(), 2);
        assert!(session.advisory().is_none());
    }

    #[test]
    fn test_detection_input_requires_capture() {
        let mut session = SessionState::new();
        assert_eq!(session.detection_input(), Err(CoreError::NoImage));
        assert_eq!(session.advisory(), Some(&Advisory::NoImage));

        session.set_capture(CapturedImage::new("image/jpeg", vec![1u8]));
        assert!(session.detection_input().is_ok());
    }
}
