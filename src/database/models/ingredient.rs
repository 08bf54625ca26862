use diesel::prelude::*;
use lombok::AllArgsConstructor;

/// One ingredient line of a recipe. Quantities correspond to the
/// recipe's stored base portion count.
#[derive(AllArgsConstructor, Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::database::schema::ingredients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IngredientRow {
    pub id: i32,
    pub recipe_id: i32,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::database::schema::ingredients)]
pub struct NewIngredientRow<'a> {
    pub recipe_id: i32,
    pub name: &'a str,
    pub quantity: f64,
    pub unit: &'a str,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Ingredient::new(row.name, row.quantity, row.unit)
    }
}
