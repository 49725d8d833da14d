//! HTTP surface: shared state and the route table.

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::CorsLayer;
use url::Url;

use crate::api::Mailer;
use crate::auth::TokenKeys;
use crate::db::{ExerciseCatalog, UserStore, WorkoutStore};
use crate::handlers::{exercises, users, workouts};

/// Everything a handler needs, cheap to clone per request.
#[derive(Clone)]
pub struct LiftState {
    pub users: UserStore,
    pub workouts: WorkoutStore,
    pub catalog: ExerciseCatalog,
    pub keys: TokenKeys,
    pub mailer: Arc<dyn Mailer>,
    pub public_base_url: Url,
}

/// Builds the full route table over the shared state.
///
/// `/exercises` is the only route without the auth gate; everything under
/// `/workouts` extracts a [`crate::middleware::CurrentUser`].
pub fn lift_router(state: LiftState) -> Router {
    Router::new()
        .route("/exercises", get(exercises::list_exercises))
        .route(
            "/workouts",
            get(workouts::workouts_for_day).post(workouts::save_workout),
        )
        .route("/workouts/all", get(workouts::workout_history))
        .route("/workouts/{id}", delete(workouts::delete_workout))
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/validate/{token}", get(users::confirm_account))
        .route("/users/logout", post(users::logout))
        .route("/users/validate-token", post(users::validate_token))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
