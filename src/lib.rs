#![warn(clippy::all)]

//! Data core of the iKladde recipe manager.
//!
//! Owns the recipe collection and its SQLite persistence, the portion
//! scaling math, the name/tag filter over the collection and the
//! UI-independent navigation state of the detail view. The windowing
//! layer lives elsewhere and only talks to the types exported here.

pub mod browser;
pub mod database;
pub mod error;
pub mod filter;
pub mod manager;
pub mod photos;
pub mod scaling;
pub mod selection;

pub use browser::RecipeBrowser;
pub use database::models::ingredient::Ingredient;
pub use database::models::photo::Photo;
pub use database::models::recipe::Recipe;
pub use database::models::step::Step;
pub use database::models::tag::Tag;
pub use database::store::{DatabaseStore, RecipeStore};
pub use error::{Error, Result};
pub use filter::RecipeFilter;
pub use manager::RecipeManager;
pub use photos::PhotoStore;
pub use selection::RecipeSelection;
