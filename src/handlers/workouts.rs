use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use tracing::{debug, info};

use crate::error::LiftError;
use crate::middleware::CurrentUser;
use crate::router::LiftState;
use crate::service::assemble_workouts;
use crate::types::MessageResponse;
use crate::types::workout::{
    DayQuery, HistoryQuery, SaveWorkoutRequest, SaveWorkoutResponse, Workout,
};

/// The verified claim must match the user id the request touches.
fn ensure_owner(claim_id: i64, requested: i64) -> Result<(), LiftError> {
    if claim_id != requested {
        return Err(LiftError::Forbidden(
            "you may only access your own workouts".into(),
        ));
    }
    Ok(())
}

/// GET /workouts?userId&date -> that day's workout as a 0- or 1-element list.
pub async fn workouts_for_day(
    State(state): State<LiftState>,
    CurrentUser(claims): CurrentUser,
    query: Result<Query<DayQuery>, QueryRejection>,
) -> Result<Json<Vec<Workout>>, LiftError> {
    let Query(query) = query.map_err(|rej| LiftError::Validation(rej.body_text()))?;
    let (Some(user_id), Some(date)) = (query.user_id, query.date) else {
        return Err(LiftError::Validation("userId and date are required".into()));
    };
    ensure_owner(claims.id, user_id)?;

    let rows = state.workouts.day_rows(user_id, date).await?;
    Ok(Json(assemble_workouts(&rows)))
}

/// GET /workouts/all?userId -> the user's entire history.
pub async fn workout_history(
    State(state): State<LiftState>,
    CurrentUser(claims): CurrentUser,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<Workout>>, LiftError> {
    let Query(query) = query.map_err(|rej| LiftError::Validation(rej.body_text()))?;
    let Some(user_id) = query.user_id else {
        return Err(LiftError::Validation("userId is required".into()));
    };
    ensure_owner(claims.id, user_id)?;

    let rows = state.workouts.history_rows(user_id).await?;
    Ok(Json(assemble_workouts(&rows)))
}

/// POST /workouts -> replace the day's workout wholesale.
pub async fn save_workout(
    State(state): State<LiftState>,
    CurrentUser(claims): CurrentUser,
    payload: Result<Json<SaveWorkoutRequest>, JsonRejection>,
) -> Result<Json<SaveWorkoutResponse>, LiftError> {
    let Json(req) = payload.map_err(|rej| LiftError::Validation(rej.body_text()))?;
    req.validate()?;
    ensure_owner(claims.id, req.user_id)?;

    let id = state
        .workouts
        .replace_for_date(req.user_id, req.date, &req.exercises)
        .await?;
    info!(user_id = req.user_id, workout_id = id, date = %req.date, "workout saved");
    Ok(Json(SaveWorkoutResponse {
        id,
        message: "Workout saved successfully".into(),
    }))
}

/// DELETE /workouts/{id} -> cascade removal; unknown ids are a quiet no-op.
pub async fn delete_workout(
    State(state): State<LiftState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, LiftError> {
    let removed = state.workouts.delete_cascade(id).await?;
    if removed == 0 {
        debug!(workout_id = id, "delete matched no workout");
    } else {
        info!(user_id = claims.id, workout_id = id, "workout deleted");
    }
    Ok(Json(MessageResponse::new("Workout deleted successfully")))
}
