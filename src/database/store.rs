use std::collections::HashSet;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use itertools::Itertools;
use tracing::trace_span;

use crate::database::functions::lower;
use crate::database::models::ingredient::{Ingredient, IngredientRow, NewIngredientRow};
use crate::database::models::recipe::{Recipe, RecipeRow};
use crate::database::models::recipe_tag::RecipeTag;
use crate::database::models::step::{NewStepRow, Step, StepRow};
use crate::database::models::tag::{NewTagRow, Tag, TagRow};
use crate::database::schema::{ingredients, recipe_tags, recipes, steps, tags};
use crate::error::Result;

/// Abstract storage for recipes and their sub-entities. The repository
/// only ever talks to storage through this interface.
pub trait RecipeStore {
    /// All recipes with core fields only; sub-collections are fetched
    /// separately per recipe.
    fn fetch_all_recipes(&self) -> Result<Vec<Recipe>>;

    fn fetch_ingredients(&self, recipe_id: i32) -> Result<Vec<Ingredient>>;

    /// Steps in cooking order.
    fn fetch_steps(&self, recipe_id: i32) -> Result<Vec<Step>>;

    fn fetch_tags(&self, recipe_id: i32) -> Result<HashSet<Tag>>;

    /// Every known tag, sorted by name.
    fn fetch_all_tags(&self) -> Result<Vec<Tag>>;

    /// Inserts a new recipe with all its sub-collections and returns the
    /// generated id.
    fn insert_recipe(&self, recipe: &Recipe) -> Result<i32>;

    /// Replace-style update: core fields are rewritten, ingredients,
    /// steps and tag links are deleted and reinserted.
    fn update_recipe(&self, recipe: &Recipe) -> Result<()>;

    /// Deletes the recipe; its ingredients, steps and tag links go with
    /// it.
    fn delete_recipe(&self, recipe_id: i32) -> Result<()>;
}

impl<S: RecipeStore> RecipeStore for &S {
    fn fetch_all_recipes(&self) -> Result<Vec<Recipe>> {
        (**self).fetch_all_recipes()
    }

    fn fetch_ingredients(&self, recipe_id: i32) -> Result<Vec<Ingredient>> {
        (**self).fetch_ingredients(recipe_id)
    }

    fn fetch_steps(&self, recipe_id: i32) -> Result<Vec<Step>> {
        (**self).fetch_steps(recipe_id)
    }

    fn fetch_tags(&self, recipe_id: i32) -> Result<HashSet<Tag>> {
        (**self).fetch_tags(recipe_id)
    }

    fn fetch_all_tags(&self) -> Result<Vec<Tag>> {
        (**self).fetch_all_tags()
    }

    fn insert_recipe(&self, recipe: &Recipe) -> Result<i32> {
        (**self).insert_recipe(recipe)
    }

    fn update_recipe(&self, recipe: &Recipe) -> Result<()> {
        (**self).update_recipe(recipe)
    }

    fn delete_recipe(&self, recipe_id: i32) -> Result<()> {
        (**self).delete_recipe(recipe_id)
    }
}

/// SQLite-backed store.
pub struct DatabaseStore {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl DatabaseStore {
    pub fn new(pool: Pool<ConnectionManager<SqliteConnection>>) -> Self {
        Self { pool }
    }
}

impl RecipeStore for DatabaseStore {
    fn fetch_all_recipes(&self) -> Result<Vec<Recipe>> {
        let span = trace_span!("fetch_all_recipes");
        let _guard = span.enter();

        let mut connection = self.pool.get()?;

        let rows = recipes::table
            .select(RecipeRow::as_select())
            .load(&mut connection)?;

        Ok(rows.into_iter().map(Recipe::from).collect_vec())
    }

    fn fetch_ingredients(&self, recipe_id: i32) -> Result<Vec<Ingredient>> {
        let mut connection = self.pool.get()?;

        let rows = ingredients::table
            .filter(ingredients::recipe_id.eq(recipe_id))
            .order(ingredients::id.asc())
            .select(IngredientRow::as_select())
            .load(&mut connection)?;

        Ok(rows.into_iter().map(Ingredient::from).collect_vec())
    }

    fn fetch_steps(&self, recipe_id: i32) -> Result<Vec<Step>> {
        let mut connection = self.pool.get()?;

        let rows = steps::table
            .filter(steps::recipe_id.eq(recipe_id))
            .order(steps::number.asc())
            .select(StepRow::as_select())
            .load(&mut connection)?;

        Ok(rows.into_iter().map(Step::from).collect_vec())
    }

    fn fetch_tags(&self, recipe_id: i32) -> Result<HashSet<Tag>> {
        let mut connection = self.pool.get()?;

        let rows = recipe_tags::table
            .inner_join(tags::table)
            .filter(recipe_tags::recipe_id.eq(recipe_id))
            .select(TagRow::as_select())
            .load(&mut connection)?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    fn fetch_all_tags(&self) -> Result<Vec<Tag>> {
        let mut connection = self.pool.get()?;

        let rows = tags::table
            .order(tags::name.asc())
            .select(TagRow::as_select())
            .load(&mut connection)?;

        Ok(rows.into_iter().map(Tag::from).collect_vec())
    }

    fn insert_recipe(&self, recipe: &Recipe) -> Result<i32> {
        let span = trace_span!("insert_recipe");
        let _guard = span.enter();

        let mut connection = self.pool.get()?;

        let id = connection.transaction(|connection| {
            let id = diesel::insert_into(recipes::table)
                .values(recipe.as_new_row())
                .returning(recipes::id)
                .get_result::<i32>(connection)?;

            insert_ingredients(connection, id, &recipe.ingredients)?;
            insert_steps(connection, id, &recipe.steps)?;
            insert_tag_links(connection, id, &recipe.tags)?;

            QueryResult::Ok(id)
        })?;

        Ok(id)
    }

    fn update_recipe(&self, recipe: &Recipe) -> Result<()> {
        let span = trace_span!("update_recipe");
        let _guard = span.enter();

        let mut connection = self.pool.get()?;

        connection.transaction(|connection| {
            diesel::update(recipes::table.find(recipe.id))
                .set(recipe.as_new_row())
                .execute(connection)?;

            diesel::delete(ingredients::table.filter(ingredients::recipe_id.eq(recipe.id)))
                .execute(connection)?;
            insert_ingredients(connection, recipe.id, &recipe.ingredients)?;

            diesel::delete(steps::table.filter(steps::recipe_id.eq(recipe.id)))
                .execute(connection)?;
            insert_steps(connection, recipe.id, &recipe.steps)?;

            diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe.id)))
                .execute(connection)?;
            insert_tag_links(connection, recipe.id, &recipe.tags)?;

            QueryResult::Ok(())
        })?;

        Ok(())
    }

    fn delete_recipe(&self, recipe_id: i32) -> Result<()> {
        let span = trace_span!("delete_recipe");
        let _guard = span.enter();

        let mut connection = self.pool.get()?;

        diesel::delete(recipes::table.find(recipe_id)).execute(&mut connection)?;

        Ok(())
    }
}

fn insert_ingredients(
    connection: &mut SqliteConnection,
    recipe_id: i32,
    recipe_ingredients: &[Ingredient],
) -> QueryResult<()> {
    let rows = recipe_ingredients
        .iter()
        .map(|ingredient| NewIngredientRow {
            recipe_id,
            name: &ingredient.name,
            quantity: ingredient.quantity,
            unit: &ingredient.unit,
        })
        .collect_vec();

    diesel::insert_into(ingredients::table)
        .values(&rows)
        .execute(connection)?;

    Ok(())
}

fn insert_steps(
    connection: &mut SqliteConnection,
    recipe_id: i32,
    recipe_steps: &[Step],
) -> QueryResult<()> {
    let rows = recipe_steps
        .iter()
        .enumerate()
        .map(|(index, step)| NewStepRow {
            recipe_id,
            number: index as i32 + 1,
            description: &step.description,
        })
        .collect_vec();

    diesel::insert_into(steps::table)
        .values(&rows)
        .execute(connection)?;

    Ok(())
}

// Tags are global: link to the existing row when one matches
// case-insensitively, insert a fresh one otherwise.
fn insert_tag_links(
    connection: &mut SqliteConnection,
    recipe_id: i32,
    recipe_tags_set: &HashSet<Tag>,
) -> QueryResult<()> {
    for tag in recipe_tags_set {
        let existing = tags::table
            .filter(lower(tags::name).eq(tag.key()))
            .select(tags::id)
            .first::<i32>(connection)
            .optional()?;

        let tag_id = match existing {
            Some(id) => id,
            None => diesel::insert_into(tags::table)
                .values(NewTagRow { name: tag.name() })
                .returning(tags::id)
                .get_result::<i32>(connection)?,
        };

        diesel::insert_or_ignore_into(recipe_tags::table)
            .values(RecipeTag::new(recipe_id, tag_id))
            .execute(connection)?;
    }

    Ok(())
}
