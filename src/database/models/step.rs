use diesel::prelude::*;
use lombok::AllArgsConstructor;

/// One preparation step. Cooking order is the index in the recipe's step
/// list; the database keeps it as an explicit 1-based `number`.
#[derive(AllArgsConstructor, Debug, Clone, PartialEq)]
pub struct Step {
    pub description: String,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::database::schema::steps)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StepRow {
    pub id: i32,
    pub recipe_id: i32,
    pub number: i32,
    pub description: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::database::schema::steps)]
pub struct NewStepRow<'a> {
    pub recipe_id: i32,
    pub number: i32,
    pub description: &'a str,
}

impl From<StepRow> for Step {
    fn from(row: StepRow) -> Self {
        Step::new(row.description)
    }
}
