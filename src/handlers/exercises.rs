use axum::Json;
use axum::extract::State;

use crate::db::models::ExerciseDefinition;
use crate::error::LiftError;
use crate::router::LiftState;

/// GET /exercises -> the shared catalog, ordered by id. This route carries
/// no auth gate; the catalog is the same for everyone.
pub async fn list_exercises(
    State(state): State<LiftState>,
) -> Result<Json<Vec<ExerciseDefinition>>, LiftError> {
    Ok(Json(state.catalog.list().await?))
}
