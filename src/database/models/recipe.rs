use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use diesel::prelude::*;

use super::ingredient::Ingredient;
use super::photo::Photo;
use super::step::Step;
use super::tag::Tag;

/// A full recipe with its ingredients, steps, tags and photo.
///
/// `id` 0 marks a transient recipe that has not been persisted yet; the
/// store assigns the real id on first save. The modified date lives on
/// the in-memory entity only, the store has no column for it.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: i32,
    pub name: String,
    pub rating: i32,
    pub portions: i32,
    pub created_date: Option<NaiveDate>,
    pub modified_date: Option<NaiveDate>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub tags: HashSet<Tag>,
    pub photo: Option<Photo>,
}

impl Recipe {
    pub const DEFAULT_PORTIONS: i32 = 2;

    pub fn new(name: &str) -> Self {
        Self {
            id: 0,
            name: name.to_owned(),
            rating: 0,
            portions: Self::DEFAULT_PORTIONS,
            created_date: Some(Local::now().date_naive()),
            modified_date: None,
            ingredients: Vec::new(),
            steps: Vec::new(),
            tags: HashSet::new(),
            photo: None,
        }
    }

    pub fn is_transient(&self) -> bool {
        self.id == 0
    }

    /// Parses a portion input field, falling back to the default serving
    /// count when the text is not a number.
    pub fn parse_portions(input: &str) -> i32 {
        input.trim().parse().unwrap_or(Self::DEFAULT_PORTIONS)
    }

    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        self.ingredients.push(ingredient);
    }

    pub fn add_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn add_tag(&mut self, tag: Tag) {
        self.tags.insert(tag);
    }
}

impl PartialEq for Recipe {
    // Same entity iff the ids match. Transient recipes (id 0) are never
    // value-equal; callers track those by position.
    fn eq(&self, other: &Self) -> bool {
        self.id != 0 && self.id == other.id
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::database::schema::recipes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecipeRow {
    pub id: i32,
    pub name: String,
    pub photo_path: Option<String>,
    pub rating: i32,
    pub portions: i32,
    pub created_date: Option<NaiveDate>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::database::schema::recipes)]
#[diesel(treat_none_as_null = true)]
pub struct NewRecipeRow<'a> {
    pub name: &'a str,
    pub photo_path: Option<&'a str>,
    pub rating: i32,
    pub portions: i32,
    pub created_date: Option<NaiveDate>,
}

impl Recipe {
    /// Core-field row for inserts and replace-style updates.
    pub(crate) fn as_new_row(&self) -> NewRecipeRow<'_> {
        NewRecipeRow {
            name: &self.name,
            photo_path: self.photo.as_ref().map(|photo| photo.file_path.as_str()),
            rating: self.rating,
            portions: self.portions,
            created_date: self.created_date,
        }
    }
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            rating: row.rating,
            portions: row.portions,
            created_date: row.created_date,
            modified_date: None,
            ingredients: Vec::new(),
            steps: Vec::new(),
            tags: HashSet::new(),
            photo: row.photo_path.map(Photo::new),
        }
    }
}
