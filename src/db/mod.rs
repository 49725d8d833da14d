//! Database module: models, schema and per-table stores.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `users.rs` / `exercises.rs` / `workouts.rs`: pool-backed stores

pub mod exercises;
pub mod models;
pub mod schema;
pub mod users;
pub mod workouts;

pub use exercises::ExerciseCatalog;
pub use models::{ExerciseDefinition, NewUser, UserRow, WorkoutJoinRow};
pub use schema::SQLITE_INIT;
pub use users::UserStore;
pub use workouts::WorkoutStore;

use crate::error::LiftError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;

pub type SqlitePool = Pool<Sqlite>;

/// Opens (creating if absent) the SQLite database behind `database_url`.
///
/// WAL keeps readers unblocked while a replace or delete transaction holds
/// the write lock; the busy timeout makes concurrent writers queue instead
/// of failing fast with SQLITE_BUSY.
pub async fn connect(database_url: &str) -> Result<SqlitePool, LiftError> {
    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePoolOptions::new().connect_with(opts).await?;
    Ok(pool)
}

/// Initialize the schema by executing the bundled DDL.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), LiftError> {
    // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
