use std::fmt;
use std::hash::{Hash, Hasher};

use diesel::prelude::*;

/// A recipe tag. "Dessert" and "dessert" are the same tag: equality and
/// hashing go through a lower-cased key derived at construction, so a tag
/// set never holds two entries differing only by case.
#[derive(Debug, Clone, Eq)]
pub struct Tag {
    name: String,
    key: String,
}

impl Tag {
    pub fn new(name: &str) -> Self {
        let name = name.trim().to_owned();
        let key = name.to_lowercase();

        Self { name, key }
    }

    /// Display name as the user typed it (minus surrounding whitespace).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical lower-cased comparison key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::database::schema::tags)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TagRow {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::database::schema::tags)]
pub struct NewTagRow<'a> {
    pub name: &'a str,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag::new(&row.name)
    }
}
