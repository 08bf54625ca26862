use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use dotenvy::dotenv;
use std::env;
use tracing::{trace, trace_span};

const SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS recipes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        photo_path TEXT,
        rating INTEGER NOT NULL DEFAULT 0,
        portions INTEGER NOT NULL DEFAULT 2,
        created_date DATE
    );

    CREATE TABLE IF NOT EXISTS ingredients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        quantity DOUBLE NOT NULL DEFAULT 0,
        unit TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS steps (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
        number INTEGER NOT NULL,
        description TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS tags (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE NOT NULL
    );

    CREATE TABLE IF NOT EXISTS recipe_tags (
        recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
        tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
        PRIMARY KEY (recipe_id, tag_id)
    );
";

// SQLite leaves foreign keys off unless every connection opts in.
#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute("PRAGMA foreign_keys = ON;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn establish_pooled_connection() -> Pool<ConnectionManager<SqliteConnection>> {
    let span = trace_span!("establishing pooled connection");
    let _guard = span.enter();

    dotenv().expect("Failed to load .env file");

    trace!("Loading database_url");
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    establish_pooled_connection_to(&database_url)
}

pub fn establish_pooled_connection_to(
    database_url: &str,
) -> Pool<ConnectionManager<SqliteConnection>> {
    trace!("Creating manager");
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    trace!("Creating pool");
    let pool = Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)
        .expect("Failed to create pool.");

    trace!("Initializing schema");
    pool.get()
        .expect("Failed to get connection from pool.")
        .batch_execute(SCHEMA_SQL)
        .expect("Failed to initialize schema.");

    pool
}
