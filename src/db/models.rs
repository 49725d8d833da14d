use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A `users` row as stored.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub confirmed: bool,
    pub confirmation_token: Option<String>,
}

/// Fields needed to create an unconfirmed account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub confirmation_token: String,
}

/// A catalog entry every user's workouts reference by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct ExerciseDefinition {
    pub id: i64,
    pub name: String,
}

/// One row of the flattened workout join.
///
/// Everything right of `date` is nullable: a workout with no exercises still
/// produces one row, as does an exercise instance with no sets or a dangling
/// definition reference.
#[derive(Debug, Clone, FromRow)]
pub struct WorkoutJoinRow {
    pub workout_id: i64,
    pub date: NaiveDate,
    pub instance_id: Option<i64>,
    pub definition_id: Option<i64>,
    pub exercise_name: Option<String>,
    pub set_id: Option<i64>,
    pub weight: Option<f64>,
    pub repetitions: Option<i64>,
}
