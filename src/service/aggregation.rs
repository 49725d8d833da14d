//! Folds flattened LEFT-JOIN rows back into the nested workout hierarchy.

use crate::db::models::WorkoutJoinRow;
use crate::types::workout::{Exercise, SetEntry, Workout};

/// Shown in place of an exercise whose definition row no longer exists.
pub const UNKNOWN_EXERCISE: &str = "Unknown Exercise";

/// Pure aggregation: rows in, nested workouts out.
///
/// Grouping keys off first occurrence at every level (workout id, instance
/// id, set id), so repeated parent columns never duplicate a parent and the
/// result is the same no matter how often the join fans out a row. A NULL
/// instance contributes no exercise, a NULL set id no set, and a NULL
/// exercise name gets the [`UNKNOWN_EXERCISE`] sentinel.
///
/// Output order follows first appearance in the input; callers wanting a
/// specific order sort the rows first (the stores use
/// `ORDER BY w.id, ei.id, s.id`).
pub fn assemble_workouts(rows: &[WorkoutJoinRow]) -> Vec<Workout> {
    let mut workouts: Vec<Workout> = Vec::new();

    for row in rows {
        let widx = match workouts.iter().position(|w| w.id == row.workout_id) {
            Some(i) => i,
            None => {
                workouts.push(Workout {
                    id: row.workout_id,
                    date: row.date,
                    exercises: Vec::new(),
                });
                workouts.len() - 1
            }
        };
        let workout = &mut workouts[widx];

        let Some(instance_id) = row.instance_id else {
            continue;
        };
        let eidx = match workout.exercises.iter().position(|e| e.id == instance_id) {
            Some(i) => i,
            None => {
                workout.exercises.push(Exercise {
                    id: instance_id,
                    exercise_definition_id: row.definition_id.unwrap_or(0),
                    name: row
                        .exercise_name
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_EXERCISE.to_string()),
                    sets: Vec::new(),
                });
                workout.exercises.len() - 1
            }
        };
        let exercise = &mut workout.exercises[eidx];

        let Some(set_id) = row.set_id else {
            continue;
        };
        if exercise.sets.iter().any(|s| s.id == set_id) {
            continue;
        }
        exercise.sets.push(SetEntry {
            id: set_id,
            weight: row.weight.unwrap_or(0.0),
            repetitions: row.repetitions.unwrap_or(0).max(0) as u32,
        });
    }

    workouts
}
