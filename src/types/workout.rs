//! Wire types for the workout endpoints.
//!
//! Field names are part of the public contract: queries use `userId`, bodies
//! use `user_id` / `exercise_definition_id`, and responses nest
//! workout -> exercises -> sets.

use crate::error::LiftError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A completed set as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetEntry {
    pub id: i64,
    pub weight: f64,
    pub repetitions: u32,
}

/// One exercise within a workout; `id` is the instance id, unique per
/// workout even when the same definition appears twice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: i64,
    pub exercise_definition_id: i64,
    pub name: String,
    pub sets: Vec<SetEntry>,
}

/// A whole day's workout as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: i64,
    pub date: NaiveDate,
    pub exercises: Vec<Exercise>,
}

/// Body of `POST /workouts`: the full replacement content for one day.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveWorkoutRequest {
    pub user_id: i64,
    pub date: NaiveDate,
    pub exercises: Vec<ExerciseDraft>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseDraft {
    pub exercise_definition_id: i64,
    #[serde(default)]
    pub sets: Vec<SetDraft>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetDraft {
    pub weight: f64,
    pub repetitions: u32,
}

impl SaveWorkoutRequest {
    /// Shape checks that typed deserialization cannot express. Runs before
    /// any database interaction.
    pub fn validate(&self) -> Result<(), LiftError> {
        for exercise in &self.exercises {
            for set in &exercise.sets {
                if !set.weight.is_finite() {
                    return Err(LiftError::Validation(
                        "set weight must be a finite number".into(),
                    ));
                }
                if set.weight < 0.0 {
                    return Err(LiftError::Validation(
                        "set weight must not be negative".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Query string of the day view: `?userId=7&date=2025-03-10`.
///
/// Both fields are optional at the type level so the handler can answer a
/// missing one with the contract's own message instead of a generic
/// deserialization error.
#[derive(Debug, Deserialize)]
pub struct DayQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
    pub date: Option<NaiveDate>,
}

/// Query string of the history view: `?userId=7`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveWorkoutResponse {
    pub id: i64,
    pub message: String,
}
