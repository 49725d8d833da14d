use crate::db::SqlitePool;
use crate::db::models::WorkoutJoinRow;
use crate::error::LiftError;
use crate::types::workout::ExerciseDraft;
use chrono::NaiveDate;
use tracing::warn;

/// The per-user workout hierarchy: workouts -> exercise instances -> sets.
///
/// All writes cascade inside a single transaction, so readers never observe
/// a half-replaced or half-deleted workout.
#[derive(Clone)]
pub struct WorkoutStore {
    pool: SqlitePool,
}

impl WorkoutStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Flattened join rows for one user's workout on one day.
    ///
    /// The explicit ORDER BY pins row order so grouping output is stable
    /// across SQLite versions and query plans.
    pub async fn day_rows(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<WorkoutJoinRow>, LiftError> {
        let rows = sqlx::query_as::<_, WorkoutJoinRow>(
            r#"SELECT
                   w.id AS workout_id,
                   w.date AS date,
                   ei.id AS instance_id,
                   ei.exercise_definition_id AS definition_id,
                   ed.name AS exercise_name,
                   s.id AS set_id,
                   s.weight AS weight,
                   s.repetitions AS repetitions
               FROM workouts w
               LEFT JOIN exercise_instances ei ON w.id = ei.workout_id
               LEFT JOIN exercise_definitions ed ON ei.exercise_definition_id = ed.id
               LEFT JOIN sets s ON ei.id = s.exercise_instance_id
               WHERE w.user_id = ? AND w.date = ?
               ORDER BY w.id, ei.id, s.id"#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Flattened join rows for a user's entire history.
    pub async fn history_rows(&self, user_id: i64) -> Result<Vec<WorkoutJoinRow>, LiftError> {
        let rows = sqlx::query_as::<_, WorkoutJoinRow>(
            r#"SELECT
                   w.id AS workout_id,
                   w.date AS date,
                   ei.id AS instance_id,
                   ei.exercise_definition_id AS definition_id,
                   ed.name AS exercise_name,
                   s.id AS set_id,
                   s.weight AS weight,
                   s.repetitions AS repetitions
               FROM workouts w
               LEFT JOIN exercise_instances ei ON w.id = ei.workout_id
               LEFT JOIN exercise_definitions ed ON ei.exercise_definition_id = ed.id
               LEFT JOIN sets s ON ei.id = s.exercise_instance_id
               WHERE w.user_id = ?
               ORDER BY w.id, ei.id, s.id"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Replaces the user's workout for `date` with exactly the given content.
    ///
    /// One transaction: the previous workout for that (user, date) and all
    /// its children go away, the new hierarchy goes in, and either all of it
    /// commits or none of it does. The leading DELETE takes SQLite's write
    /// lock up front, so two concurrent saves for the same day serialize
    /// instead of interleaving.
    ///
    /// Entries whose `exercise_definition_id` matches no catalog row are
    /// skipped with a warning rather than failing the whole save.
    pub async fn replace_for_date(
        &self,
        user_id: i64,
        date: NaiveDate,
        exercises: &[ExerciseDraft],
    ) -> Result<i64, LiftError> {
        let mut tx = self.pool.begin().await?;

        // children first: the old hierarchy for this day goes away bottom-up
        sqlx::query(
            r#"DELETE FROM sets WHERE exercise_instance_id IN (
                   SELECT ei.id FROM exercise_instances ei
                   JOIN workouts w ON ei.workout_id = w.id
                   WHERE w.user_id = ? AND w.date = ?)"#,
        )
        .bind(user_id)
        .bind(date)
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            r#"DELETE FROM exercise_instances WHERE workout_id IN (
                   SELECT id FROM workouts WHERE user_id = ? AND date = ?)"#,
        )
        .bind(user_id)
        .bind(date)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM workouts WHERE user_id = ? AND date = ?")
            .bind(user_id)
            .bind(date)
            .execute(&mut *tx)
            .await?;

        let res = sqlx::query("INSERT INTO workouts (user_id, date) VALUES (?, ?)")
            .bind(user_id)
            .bind(date)
            .execute(&mut *tx)
            .await?;
        let workout_id = res.last_insert_rowid();

        for exercise in exercises {
            // the sub-select inserts only when the referenced definition exists
            let inserted = sqlx::query(
                r#"INSERT INTO exercise_instances (workout_id, exercise_definition_id)
                   SELECT ?, id FROM exercise_definitions WHERE id = ?"#,
            )
            .bind(workout_id)
            .bind(exercise.exercise_definition_id)
            .execute(&mut *tx)
            .await?;
            if inserted.rows_affected() == 0 {
                warn!(
                    definition_id = exercise.exercise_definition_id,
                    "skipping exercise with unknown definition"
                );
                continue;
            }
            let instance_id = inserted.last_insert_rowid();

            for set in &exercise.sets {
                sqlx::query(
                    "INSERT INTO sets (exercise_instance_id, weight, repetitions) VALUES (?, ?, ?)",
                )
                .bind(instance_id)
                .bind(set.weight)
                .bind(set.repetitions)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(workout_id)
    }

    /// Removes a workout and everything under it, in one transaction.
    ///
    /// Returns how many workout rows went away; deleting an id that does not
    /// exist is a no-op, not an error.
    pub async fn delete_cascade(&self, workout_id: i64) -> Result<u64, LiftError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"DELETE FROM sets WHERE exercise_instance_id IN (
                   SELECT id FROM exercise_instances WHERE workout_id = ?)"#,
        )
        .bind(workout_id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM exercise_instances WHERE workout_id = ?")
            .bind(workout_id)
            .execute(&mut *tx)
            .await?;
        let res = sqlx::query("DELETE FROM workouts WHERE id = ?")
            .bind(workout_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(res.rows_affected())
    }
}
