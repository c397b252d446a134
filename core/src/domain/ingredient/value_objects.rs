use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ingredient::entities::Ingredient;

/// Ingredients chosen by the user, without duplicates, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Vec<String>)]
pub struct SelectedIngredients(Vec<Ingredient>);

impl SelectedIngredients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the ingredient when absent, removes it when present.
    /// Returns whether it is selected afterwards.
    pub fn toggle(&mut self, ingredient: Ingredient) -> bool {
        if let Some(position) = self.0.iter().position(|i| *i == ingredient) {
            self.0.remove(position);
            false
        } else {
            self.0.push(ingredient);
            true
        }
    }

    /// Union with `ingredients`. Never removes an existing selection.
    pub fn merge<I>(&mut self, ingredients: I) -> usize
    where
        I: IntoIterator<Item = Ingredient>,
    {
        let mut added = 0;
        for ingredient in ingredients {
            if !self.0.contains(&ingredient) {
                self.0.push(ingredient);
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, ingredient: &Ingredient) -> bool {
        self.0.contains(ingredient)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.0.iter()
    }

    pub fn to_vec(&self) -> Vec<Ingredient> {
        self.0.clone()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<Ingredient> for SelectedIngredients {
    fn from_iter<T: IntoIterator<Item = Ingredient>>(iter: T) -> Self {
        let mut selected = SelectedIngredients::new();
        selected.merge(iter);
        selected
    }
}
