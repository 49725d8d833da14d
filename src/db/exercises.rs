use crate::db::SqlitePool;
use crate::db::models::ExerciseDefinition;
use crate::error::LiftError;
use tracing::info;

/// Starter catalog inserted into an empty database so a fresh deployment has
/// something to track against.
const DEFAULT_EXERCISES: &[&str] = &[
    "Bench Press",
    "Squat",
    "Deadlift",
    "Overhead Press",
    "Barbell Row",
    "Pull Up",
    "Push Up",
    "Lunge",
    "Bicep Curl",
    "Plank",
];

/// The shared, read-mostly exercise catalog.
#[derive(Clone)]
pub struct ExerciseCatalog {
    pool: SqlitePool,
}

impl ExerciseCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<ExerciseDefinition>, LiftError> {
        let rows = sqlx::query_as::<_, ExerciseDefinition>(
            "SELECT id, name FROM exercise_definitions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Seeds the starter catalog, but only into an empty table.
    pub async fn seed_if_empty(&self) -> Result<(), LiftError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exercise_definitions")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(());
        }
        for name in DEFAULT_EXERCISES {
            sqlx::query("INSERT INTO exercise_definitions (name) VALUES (?)")
                .bind(name)
                .execute(&self.pool)
                .await?;
        }
        info!(count = DEFAULT_EXERCISES.len(), "seeded exercise catalog");
        Ok(())
    }
}
