//! UI-independent glue for the main window: the visible recipe list, the
//! filter state and the active selection.

use tracing::{trace_span, warn};

use crate::database::models::ingredient::Ingredient;
use crate::database::models::recipe::Recipe;
use crate::database::models::step::Step;
use crate::database::models::tag::Tag;
use crate::database::store::RecipeStore;
use crate::error::Result;
use crate::filter::{sort_by_rating, RecipeFilter};
use crate::manager::RecipeManager;
use crate::selection::RecipeSelection;

/// Binds the repository, the filter engine and the navigation state
/// together the way the main recipe window drives them. Owns the
/// currently visible (filtered) list and the cached tag choices.
pub struct RecipeBrowser<S> {
    manager: RecipeManager<S>,
    filter: RecipeFilter,
    selection: RecipeSelection,
    visible: Vec<Recipe>,
    all_tags: Vec<Tag>,
}

impl<S: RecipeStore> RecipeBrowser<S> {
    /// Loads every recipe and tag from the store and starts with an
    /// unfiltered view and no selection.
    pub fn new(store: S) -> Result<Self> {
        let mut manager = RecipeManager::new(store);
        manager.load_data()?;

        let all_tags = manager.all_tags().unwrap_or_else(|e| {
            warn!("failed to load tags: {e}");
            Vec::new()
        });
        let visible = manager.recipes().to_vec();

        Ok(Self {
            manager,
            filter: RecipeFilter::new(),
            selection: RecipeSelection::new(),
            visible,
            all_tags,
        })
    }

    pub fn manager(&self) -> &RecipeManager<S> {
        &self.manager
    }

    /// The filtered list in repository order (or rating order after
    /// [`Self::sort_visible_by_rating`]).
    pub fn visible_recipes(&self) -> &[Recipe] {
        &self.visible
    }

    /// Tag choices for the filter combo, sorted by name.
    pub fn all_tags(&self) -> &[Tag] {
        &self.all_tags
    }

    pub fn selection(&self) -> &RecipeSelection {
        &self.selection
    }

    /// Replaces the name query and recomputes the visible list.
    pub fn set_query(&mut self, query: &str) {
        self.filter.query = query.to_owned();
        self.apply_filters();
    }

    /// Checks or unchecks a tag in the filter set and recomputes the
    /// visible list.
    pub fn set_tag_checked(&mut self, tag: &Tag, checked: bool) {
        if checked {
            self.filter.tags.insert(tag.clone());
        } else {
            self.filter.tags.remove(tag);
        }
        self.apply_filters();
    }

    /// Stable highest-first rating sort of the visible list only; the
    /// repository keeps its own order.
    pub fn sort_visible_by_rating(&mut self) {
        sort_by_rating(&mut self.visible);
    }

    /// Opens the recipe at `visible_index` of the filtered list in the
    /// detail view.
    pub fn select(&mut self, visible_index: usize) {
        if let Some(recipe) = self.visible.get(visible_index) {
            self.selection.select(recipe);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn next_step(&mut self) {
        self.selection.next_step();
    }

    pub fn prev_step(&mut self) {
        self.selection.prev_step();
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.selection.current_step()
    }

    pub fn set_portions(&mut self, portions: i32) {
        self.selection.set_portions(portions);
    }

    pub fn displayed_portions(&self) -> Option<i32> {
        self.selection.displayed_portions()
    }

    pub fn scaled_ingredients(&self) -> Vec<Ingredient> {
        self.selection.scaled_ingredients()
    }

    /// Writes the rating of the selected recipe through to the
    /// repository and saves it immediately. This is the only navigation
    /// action with a persistence side effect. A selected recipe that was
    /// never saved is added to the repository and persisted by this call.
    pub fn set_rating(&mut self, rating: i32) -> Result<()> {
        let Some(id) = self.selection.recipe().map(|recipe| recipe.id) else {
            return Ok(());
        };

        self.selection.set_rating(rating);

        if id == 0 {
            // A transient id matches nothing in the collection; persist
            // the selected copy itself, which assigns its id.
            if let Some(recipe) = self.selection.recipe().cloned() {
                let index = self.manager.add_recipe(recipe);
                self.manager.save_recipe(index)?;
                if let Some(saved) = self.manager.recipe(index) {
                    self.selection.set_id(saved.id);
                }
            }

            return Ok(());
        }

        for recipe in &mut self.visible {
            if recipe.id == id {
                recipe.rating = rating;
            }
        }

        if let Some(index) = self.manager.position_of(id) {
            if let Some(recipe) = self.manager.recipe_mut(index) {
                recipe.rating = rating;
            }
            self.manager.save_recipe(index)?;
        }

        Ok(())
    }

    /// Runs an editor session against the repository and refreshes the
    /// browser when it returns, whatever the session did.
    pub fn run_editor_session<F, R>(&mut self, session: F) -> R
    where
        F: FnOnce(&mut RecipeManager<S>) -> R,
    {
        let result = session(&mut self.manager);
        self.refresh();

        result
    }

    /// Reloads the collection from the store, re-applies the filter and
    /// refreshes the tag choices.
    pub fn refresh(&mut self) {
        let span = trace_span!("refresh");
        let _guard = span.enter();

        if let Err(e) = self.manager.load_data() {
            warn!("failed to reload recipes: {e}");
        }
        self.apply_filters();
        self.all_tags = self.manager.all_tags().unwrap_or_else(|e| {
            warn!("failed to reload tags: {e}");
            Vec::new()
        });
    }

    fn apply_filters(&mut self) {
        self.visible = self.filter.apply(self.manager.recipes());
    }
}
