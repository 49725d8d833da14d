pub mod exercises;
pub mod users;
pub mod workouts;
