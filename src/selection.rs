//! Navigation state of the recipe detail view.

use crate::database::models::ingredient::Ingredient;
use crate::database::models::recipe::Recipe;
use crate::database::models::step::Step;
use crate::scaling::{portion_factor, scale_ingredients};

/// Tracks which recipe is open in the detail view, which step is shown
/// and which portion override applies, independent of any display
/// technology.
///
/// Selecting clones the recipe: the ingredient list frozen at that
/// moment is the base for all scaling, and edits made elsewhere do not
/// show up until the recipe is selected again.
#[derive(Debug, Default)]
pub struct RecipeSelection {
    current: Option<CurrentRecipe>,
}

#[derive(Debug)]
struct CurrentRecipe {
    recipe: Recipe,
    step_index: usize,
    portion_override: Option<i32>,
}

impl RecipeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `recipe` in the detail view: first step, no portion
    /// override, base ingredients captured.
    pub fn select(&mut self, recipe: &Recipe) {
        self.current = Some(CurrentRecipe {
            recipe: recipe.clone(),
            step_index: 0,
            portion_override: None,
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.current.as_ref().map(|current| &current.recipe)
    }

    pub fn step_index(&self) -> Option<usize> {
        self.current.as_ref().map(|current| current.step_index)
    }

    pub fn current_step(&self) -> Option<&Step> {
        let current = self.current.as_ref()?;

        current.recipe.steps.get(current.step_index)
    }

    /// Moves to the next step; a no-op on the last step.
    pub fn next_step(&mut self) {
        if let Some(current) = self.current.as_mut() {
            if current.step_index + 1 < current.recipe.steps.len() {
                current.step_index += 1;
            }
        }
    }

    /// Moves back one step; a no-op on the first step.
    pub fn prev_step(&mut self) {
        if let Some(current) = self.current.as_mut() {
            if current.step_index > 0 {
                current.step_index -= 1;
            }
        }
    }

    /// Sets the display-only portion override. The recipe's stored
    /// portion count is never touched.
    pub fn set_portions(&mut self, portions: i32) {
        if let Some(current) = self.current.as_mut() {
            current.portion_override = Some(portions);
        }
    }

    /// Serving count to display: the override when set, the recipe's
    /// stored portions otherwise.
    pub fn displayed_portions(&self) -> Option<i32> {
        let current = self.current.as_ref()?;

        Some(current.portion_override.unwrap_or(current.recipe.portions))
    }

    /// Ingredients scaled from the frozen base snapshot to the displayed
    /// portion count.
    pub fn scaled_ingredients(&self) -> Vec<Ingredient> {
        let Some(current) = self.current.as_ref() else {
            return Vec::new();
        };

        let factor = match current.portion_override {
            Some(portions) => portion_factor(portions, current.recipe.portions),
            None => 1.0,
        };

        scale_ingredients(&current.recipe.ingredients, factor)
    }

    pub(crate) fn set_rating(&mut self, rating: i32) {
        if let Some(current) = self.current.as_mut() {
            current.recipe.rating = rating;
        }
    }

    // Carries the store-assigned id back into the selected copy after a
    // first save.
    pub(crate) fn set_id(&mut self, id: i32) {
        if let Some(current) = self.current.as_mut() {
            current.recipe.id = id;
        }
    }
}
