pub mod aggregation;

pub use aggregation::assemble_workouts;
