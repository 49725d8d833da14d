//! SQL DDL for initializing the workout storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `users` keyed by unique email, confirmation state inline
/// - `exercise_definitions` as the shared exercise catalog
/// - `workouts` -> `exercise_instances` -> `sets` as the per-user hierarchy
/// - dates stored as ISO-8601 `YYYY-MM-DD` TEXT
///
/// Referential integrity is enforced by the write paths (replace and delete
/// run their cascades inside one transaction), not by the `foreign_keys`
/// pragma, so the `REFERENCES` clauses below document intent.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    confirmed INTEGER NOT NULL DEFAULT 0,
    confirmation_token TEXT NULL
);

CREATE TABLE IF NOT EXISTS exercise_definitions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS workouts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    date TEXT NOT NULL -- YYYY-MM-DD
);

CREATE TABLE IF NOT EXISTS exercise_instances (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    workout_id INTEGER NOT NULL REFERENCES workouts(id),
    exercise_definition_id INTEGER NOT NULL REFERENCES exercise_definitions(id)
);

CREATE TABLE IF NOT EXISTS sets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    exercise_instance_id INTEGER NOT NULL REFERENCES exercise_instances(id),
    weight REAL NOT NULL CHECK (weight >= 0),
    repetitions INTEGER NOT NULL CHECK (repetitions >= 0)
);

-- The day and history reads both filter on user_id, the day read also on date.
CREATE INDEX IF NOT EXISTS idx_workouts_user_date ON workouts(user_id, date);
CREATE INDEX IF NOT EXISTS idx_exercise_instances_workout ON exercise_instances(workout_id);
CREATE INDEX IF NOT EXISTS idx_sets_instance ON sets(exercise_instance_id);
"#;
