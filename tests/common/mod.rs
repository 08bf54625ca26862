#![allow(dead_code)] // not every test binary uses every helper

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use ikladde::error::Result;
use ikladde::{Error, Ingredient, Recipe, RecipeStore, Step, Tag};

/// In-memory stand-in for the SQLite store, with switches to simulate
/// storage failures.
#[derive(Default)]
pub struct MemoryStore {
    rows: RefCell<Vec<Recipe>>,
    next_id: Cell<i32>,
    pub fail_sub_fetches: Cell<bool>,
    pub fail_writes: Cell<bool>,
}

fn storage_error() -> Error {
    Error::Storage(diesel::result::Error::NotFound)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            ..Default::default()
        }
    }

    /// A store pre-populated with `recipes`; ids are assigned to any
    /// entry that does not carry one.
    pub fn seeded(recipes: Vec<Recipe>) -> Self {
        let store = Self::new();
        for mut recipe in recipes {
            if recipe.id == 0 {
                recipe.id = store.next_id.get();
                store.next_id.set(recipe.id + 1);
            } else {
                store.next_id.set(store.next_id.get().max(recipe.id + 1));
            }
            store.rows.borrow_mut().push(recipe);
        }
        store
    }

    pub fn stored(&self, id: i32) -> Option<Recipe> {
        self.rows
            .borrow()
            .iter()
            .find(|recipe| recipe.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }
}

impl RecipeStore for MemoryStore {
    fn fetch_all_recipes(&self) -> Result<Vec<Recipe>> {
        Ok(self
            .rows
            .borrow()
            .iter()
            .cloned()
            .map(|mut recipe| {
                // Core fields only, like the real store.
                recipe.ingredients = Vec::new();
                recipe.steps = Vec::new();
                recipe.tags = HashSet::new();
                recipe.modified_date = None;
                recipe
            })
            .collect())
    }

    fn fetch_ingredients(&self, recipe_id: i32) -> Result<Vec<Ingredient>> {
        if self.fail_sub_fetches.get() {
            return Err(storage_error());
        }

        Ok(self
            .stored(recipe_id)
            .map(|recipe| recipe.ingredients)
            .unwrap_or_default())
    }

    fn fetch_steps(&self, recipe_id: i32) -> Result<Vec<Step>> {
        if self.fail_sub_fetches.get() {
            return Err(storage_error());
        }

        Ok(self
            .stored(recipe_id)
            .map(|recipe| recipe.steps)
            .unwrap_or_default())
    }

    fn fetch_tags(&self, recipe_id: i32) -> Result<HashSet<Tag>> {
        if self.fail_sub_fetches.get() {
            return Err(storage_error());
        }

        Ok(self
            .stored(recipe_id)
            .map(|recipe| recipe.tags)
            .unwrap_or_default())
    }

    fn fetch_all_tags(&self) -> Result<Vec<Tag>> {
        let mut tags: Vec<Tag> = self
            .rows
            .borrow()
            .iter()
            .flat_map(|recipe| recipe.tags.iter().cloned())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        tags.sort_by(|a, b| a.name().cmp(b.name()));

        Ok(tags)
    }

    fn insert_recipe(&self, recipe: &Recipe) -> Result<i32> {
        if self.fail_writes.get() {
            return Err(storage_error());
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let mut stored = recipe.clone();
        stored.id = id;
        self.rows.borrow_mut().push(stored);

        Ok(id)
    }

    fn update_recipe(&self, recipe: &Recipe) -> Result<()> {
        if self.fail_writes.get() {
            return Err(storage_error());
        }

        let mut rows = self.rows.borrow_mut();
        let row = rows
            .iter_mut()
            .find(|stored| stored.id == recipe.id)
            .ok_or_else(storage_error)?;
        *row = recipe.clone();

        Ok(())
    }

    fn delete_recipe(&self, recipe_id: i32) -> Result<()> {
        if self.fail_writes.get() {
            return Err(storage_error());
        }

        self.rows.borrow_mut().retain(|recipe| recipe.id != recipe_id);

        Ok(())
    }
}

/// A persisted-looking recipe with one ingredient, two steps and a tag.
pub fn sample_recipe(name: &str) -> Recipe {
    let mut recipe = Recipe::new(name);
    recipe.portions = 4;
    recipe.add_ingredient(Ingredient::new("Flour".to_owned(), 200.0, "g".to_owned()));
    recipe.add_step(Step::new("Mix everything".to_owned()));
    recipe.add_step(Step::new("Bake it".to_owned()));
    recipe.add_tag(Tag::new("Dessert"));
    recipe
}
