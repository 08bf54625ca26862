//! The recipe repository: the canonical in-memory collection, reconciled
//! against the backing store.

use chrono::Local;
use tracing::{trace_span, warn};

use crate::database::models::recipe::Recipe;
use crate::database::models::tag::Tag;
use crate::database::store::RecipeStore;
use crate::error::Result;

/// Single authoritative in-memory view of all recipes. All reads and
/// writes to storage go through here.
///
/// One active editor session per process is assumed. Saves of the same
/// recipe from a second session are not reconciled; the last write wins.
pub struct RecipeManager<S> {
    store: S,
    recipes: Vec<Recipe>,
}

impl<S: RecipeStore> RecipeManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            recipes: Vec::new(),
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn recipe(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    pub fn recipe_mut(&mut self, index: usize) -> Option<&mut Recipe> {
        self.recipes.get_mut(index)
    }

    /// Position of a persisted recipe. Transient recipes have no id to
    /// look up; callers keep the index returned by [`Self::add_recipe`].
    pub fn position_of(&self, id: i32) -> Option<usize> {
        if id == 0 {
            return None;
        }

        self.recipes.iter().position(|recipe| recipe.id == id)
    }

    /// Replaces the in-memory collection from the store. A failing
    /// sub-collection query is logged and leaves that sub-collection
    /// empty, so one broken recipe cannot hide the rest.
    pub fn load_data(&mut self) -> Result<()> {
        let span = trace_span!("load_data");
        let _guard = span.enter();

        let mut recipes = self.store.fetch_all_recipes()?;

        for recipe in &mut recipes {
            recipe.ingredients = self.store.fetch_ingredients(recipe.id).unwrap_or_else(|e| {
                warn!("failed to load ingredients for recipe {}: {e}", recipe.id);
                Vec::new()
            });
            recipe.steps = self.store.fetch_steps(recipe.id).unwrap_or_else(|e| {
                warn!("failed to load steps for recipe {}: {e}", recipe.id);
                Vec::new()
            });
            recipe.tags = self.store.fetch_tags(recipe.id).unwrap_or_else(|e| {
                warn!("failed to load tags for recipe {}: {e}", recipe.id);
                Default::default()
            });
        }

        self.recipes = recipes;

        Ok(())
    }

    /// Appends a transient recipe to the collection only; nothing is
    /// persisted until [`Self::save_recipe`]. Returns its position.
    pub fn add_recipe(&mut self, recipe: Recipe) -> usize {
        self.recipes.push(recipe);

        self.recipes.len() - 1
    }

    /// Persists the recipe at `index` and stamps its modified date.
    /// Transient recipes are inserted and receive their id from the
    /// store; persisted ones get a full replace-style update. After a
    /// successful save the collection and the store agree on this
    /// recipe. On a storage error the in-memory state keeps the
    /// attempted change.
    pub fn save_recipe(&mut self, index: usize) -> Result<()> {
        let span = trace_span!("save_recipe");
        let _guard = span.enter();

        let recipe = &mut self.recipes[index];
        recipe.modified_date = Some(Local::now().date_naive());

        if recipe.is_transient() {
            recipe.id = self.store.insert_recipe(recipe)?;
        } else {
            self.store.update_recipe(recipe)?;
        }

        Ok(())
    }

    /// Removes the recipe at `index` from the collection and, when it
    /// was ever persisted, from the store (which cascades to its
    /// sub-entities). The in-memory removal stands even if the store
    /// delete fails.
    pub fn remove_recipe(&mut self, index: usize) -> Result<()> {
        let span = trace_span!("remove_recipe");
        let _guard = span.enter();

        let recipe = self.recipes.remove(index);

        if !recipe.is_transient() {
            self.store.delete_recipe(recipe.id)?;
        }

        Ok(())
    }

    /// Every known tag, sorted by name.
    pub fn all_tags(&self) -> Result<Vec<Tag>> {
        self.store.fetch_all_tags()
    }
}
