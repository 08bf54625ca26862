use diesel::prelude::*;
use lombok::AllArgsConstructor;

/// Link row between a recipe and a tag.
#[derive(Queryable, Selectable, Insertable, AllArgsConstructor, Debug)]
#[diesel(table_name = crate::database::schema::recipe_tags)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecipeTag {
    pub recipe_id: i32,
    pub tag_id: i32,
}
