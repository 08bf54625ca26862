use diesel::define_sql_function;
use diesel::sql_types::Text;

define_sql_function! {
    /// SQLite `lower`, used for case-insensitive tag lookups.
    fn lower(name: Text) -> Text;
}
