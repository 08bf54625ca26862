//! Filtering and sorting of the visible recipe list.

use std::cmp::Reverse;
use std::collections::HashSet;

use itertools::Itertools;

use crate::database::models::recipe::Recipe;
use crate::database::models::tag::Tag;

/// Current filter settings for the recipe list: a case-insensitive
/// substring match on the name and a set of tags of which at least one
/// must be present. An empty query and an empty tag set each match
/// everything.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub query: String,
    pub tags: HashSet<Tag>,
}

impl RecipeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        let query = self.query.to_lowercase();
        let matches_name = query.is_empty() || recipe.name.to_lowercase().contains(&query);
        let matches_tags =
            self.tags.is_empty() || self.tags.iter().any(|tag| recipe.tags.contains(tag));

        matches_name && matches_tags
    }

    /// The visible subsequence of `recipes`, original order preserved.
    pub fn apply(&self, recipes: &[Recipe]) -> Vec<Recipe> {
        recipes
            .iter()
            .filter(|recipe| self.matches(recipe))
            .cloned()
            .collect_vec()
    }
}

/// Stable sort of the visible list by rating, highest first. Ties keep
/// their previous relative order. Sorting the visible list never touches
/// the repository's own order.
pub fn sort_by_rating(recipes: &mut [Recipe]) {
    recipes.sort_by_key(|recipe| Reverse(recipe.rating));
}
