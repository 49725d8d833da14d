//! Route tests for the workout endpoints: saving, reading back, history and
//! deletion, plus the auth and ownership rules guarding them.

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{Value, json};

async fn definition_id(app: &TestApp, name: &str) -> i64 {
    let (status, body) = app.request("GET", "/exercises", None, None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array()
        .and_then(|list| list.iter().find(|e| e["name"] == name))
        .and_then(|e| e["id"].as_i64())
        .unwrap_or_else(|| panic!("{name} not seeded"))
}

#[tokio::test]
async fn full_workout_lifecycle() {
    let app = TestApp::spawn("lifecycle").await;
    let (user_id, bearer) = app.signup_and_login("lifter@example.com", "pw").await;

    let bench = definition_id(&app, "Bench Press").await;
    let squat = definition_id(&app, "Squat").await;

    let (status, body) = app
        .request(
            "POST",
            "/workouts",
            Some(json!({
                "user_id": user_id,
                "date": "2025-03-10",
                "exercises": [
                    {
                        "exercise_definition_id": bench,
                        "sets": [
                            {"weight": 60.0, "repetitions": 5},
                            {"weight": 62.5, "repetitions": 5},
                        ],
                    },
                    {
                        "exercise_definition_id": squat,
                        "sets": [{"weight": 100.0, "repetitions": 3}],
                    },
                ],
            })),
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "save failed: {body}");
    assert_eq!(body["message"], "Workout saved successfully");
    let workout_id = body["id"].as_i64().expect("workout id");

    let (status, body) = app
        .request(
            "GET",
            &format!("/workouts?userId={user_id}&date=2025-03-10"),
            None,
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let day = body.as_array().expect("day response is an array");
    assert_eq!(day.len(), 1);
    let workout = &day[0];
    assert_eq!(workout["id"].as_i64(), Some(workout_id));
    assert_eq!(workout["date"], "2025-03-10");

    let exercises = workout["exercises"].as_array().expect("exercises array");
    assert_eq!(exercises.len(), 2);
    assert_eq!(exercises[0]["exercise_definition_id"].as_i64(), Some(bench));
    assert_eq!(exercises[0]["name"], "Bench Press");
    let sets = exercises[0]["sets"].as_array().expect("sets array");
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0]["weight"], json!(60.0));
    assert_eq!(sets[0]["repetitions"], json!(5));
    assert_eq!(sets[1]["weight"], json!(62.5));
    assert_eq!(exercises[1]["name"], "Squat");

    // A second day shows up in the history alongside the first.
    let (status, _) = app
        .request(
            "POST",
            "/workouts",
            Some(json!({
                "user_id": user_id,
                "date": "2025-03-12",
                "exercises": [
                    {"exercise_definition_id": bench, "sets": [{"weight": 65.0, "repetitions": 5}]},
                ],
            })),
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(
            "GET",
            &format!("/workouts/all?userId={user_id}"),
            None,
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let history = body.as_array().expect("history array");
    assert_eq!(history.len(), 2);
    let dates: Vec<&str> = history
        .iter()
        .filter_map(|w| w["date"].as_str())
        .collect();
    assert_eq!(dates, vec!["2025-03-10", "2025-03-12"]);

    let (status, body) = app
        .request(
            "DELETE",
            &format!("/workouts/{workout_id}"),
            None,
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Workout deleted successfully");

    let (status, body) = app
        .request(
            "GET",
            &format!("/workouts?userId={user_id}&date=2025-03-10"),
            None,
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn saving_the_same_day_again_replaces_it() {
    let app = TestApp::spawn("resave").await;
    let (user_id, bearer) = app.signup_and_login("resave@example.com", "pw").await;
    let bench = definition_id(&app, "Bench Press").await;
    let row = definition_id(&app, "Barbell Row").await;

    let save = |exercises: Value| {
        json!({
            "user_id": user_id,
            "date": "2025-04-01",
            "exercises": exercises,
        })
    };

    let (status, _) = app
        .request(
            "POST",
            "/workouts",
            Some(save(json!([
                {"exercise_definition_id": bench, "sets": [{"weight": 60.0, "repetitions": 5}]},
            ]))),
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(
            "POST",
            "/workouts",
            Some(save(json!([
                {"exercise_definition_id": row, "sets": [{"weight": 40.0, "repetitions": 8}]},
            ]))),
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let second_id = body["id"].as_i64().expect("workout id");

    let (status, body) = app
        .request(
            "GET",
            &format!("/workouts?userId={user_id}&date=2025-04-01"),
            None,
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let day = body.as_array().expect("day array");
    assert_eq!(day.len(), 1, "old workout should be gone");
    assert_eq!(day[0]["id"].as_i64(), Some(second_id));
    assert_eq!(day[0]["exercises"][0]["name"], "Barbell Row");

    // The replaced rows are really gone from the store.
    let (workouts,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM workouts")
        .fetch_one(&app.pool)
        .await
        .expect("count workouts");
    assert_eq!(workouts, 1);
    let (sets,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sets")
        .fetch_one(&app.pool)
        .await
        .expect("count sets");
    assert_eq!(sets, 1);
}

#[tokio::test]
async fn saving_an_empty_day_leaves_an_empty_workout() {
    let app = TestApp::spawn("empty-day").await;
    let (user_id, bearer) = app.signup_and_login("rest@example.com", "pw").await;

    let (status, _) = app
        .request(
            "POST",
            "/workouts",
            Some(json!({
                "user_id": user_id,
                "date": "2025-04-02",
                "exercises": [],
            })),
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(
            "GET",
            &format!("/workouts?userId={user_id}&date=2025-04-02"),
            None,
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let day = body.as_array().expect("day array");
    assert_eq!(day.len(), 1);
    assert_eq!(day[0]["exercises"], json!([]));
}

#[tokio::test]
async fn workout_routes_demand_a_valid_token() {
    let app = TestApp::spawn("workout-auth").await;

    let (status, body) = app
        .request("GET", "/workouts?userId=1&date=2025-03-10", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "token_required");

    let (status, body) = app
        .request(
            "GET",
            "/workouts?userId=1&date=2025-03-10",
            None,
            Some("garbage"),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "token_invalid");

    let (status, body) = app
        .request(
            "POST",
            "/workouts",
            Some(json!({"user_id": 1, "date": "2025-03-10", "exercises": []})),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "token_required");

    let (status, body) = app.request("DELETE", "/workouts/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "token_required");
}

#[tokio::test]
async fn users_cannot_touch_each_others_workouts() {
    let app = TestApp::spawn("ownership").await;
    let (alice_id, alice_bearer) = app.signup_and_login("alice@example.com", "pw").await;
    let (bob_id, _) = app.signup_and_login("bob@example.com", "pw").await;
    assert_ne!(alice_id, bob_id);

    let (status, body) = app
        .request(
            "GET",
            &format!("/workouts?userId={bob_id}&date=2025-03-10"),
            None,
            Some(&alice_bearer),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "forbidden");
    assert_eq!(
        body["error"]["message"],
        "you may only access your own workouts"
    );

    let (status, body) = app
        .request(
            "GET",
            &format!("/workouts/all?userId={bob_id}"),
            None,
            Some(&alice_bearer),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "forbidden");

    let (status, body) = app
        .request(
            "POST",
            "/workouts",
            Some(json!({"user_id": bob_id, "date": "2025-03-10", "exercises": []})),
            Some(&alice_bearer),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "forbidden");
}

#[tokio::test]
async fn read_queries_validate_their_parameters() {
    let app = TestApp::spawn("query-validation").await;
    let (user_id, bearer) = app.signup_and_login("query@example.com", "pw").await;

    let (status, body) = app
        .request(
            "GET",
            &format!("/workouts?userId={user_id}"),
            None,
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "userId and date are required");

    let (status, body) = app
        .request("GET", "/workouts?date=2025-03-10", None, Some(&bearer))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "userId and date are required");

    let (status, body) = app
        .request("GET", "/workouts/all", None, Some(&bearer))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "userId is required");

    // A malformed date never reaches the store.
    let (status, body) = app
        .request(
            "GET",
            &format!("/workouts?userId={user_id}&date=not-a-date"),
            None,
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation");
}

#[tokio::test]
async fn save_rejects_bad_payloads() {
    let app = TestApp::spawn("save-validation").await;
    let (user_id, bearer) = app.signup_and_login("strict@example.com", "pw").await;
    let bench = definition_id(&app, "Bench Press").await;

    let (status, body) = app
        .request(
            "POST",
            "/workouts",
            Some(json!({
                "user_id": user_id,
                "date": "2025-03-10",
                "exercises": [
                    {"exercise_definition_id": bench, "sets": [{"weight": -5.0, "repetitions": 5}]},
                ],
            })),
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "set weight must not be negative");

    // Body missing the date does not deserialize.
    let (status, body) = app
        .request(
            "POST",
            "/workouts",
            Some(json!({"user_id": user_id, "exercises": []})),
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation");
}

#[tokio::test]
async fn unknown_definitions_are_dropped_from_saves() {
    let app = TestApp::spawn("unknown-definition").await;
    let (user_id, bearer) = app.signup_and_login("mixed@example.com", "pw").await;
    let bench = definition_id(&app, "Bench Press").await;

    let (status, _) = app
        .request(
            "POST",
            "/workouts",
            Some(json!({
                "user_id": user_id,
                "date": "2025-03-10",
                "exercises": [
                    {"exercise_definition_id": bench, "sets": [{"weight": 60.0, "repetitions": 5}]},
                    {"exercise_definition_id": 9999, "sets": [{"weight": 10.0, "repetitions": 10}]},
                ],
            })),
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(
            "GET",
            &format!("/workouts?userId={user_id}&date=2025-03-10"),
            None,
            Some(&bearer),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let exercises = body[0]["exercises"].as_array().expect("exercises array");
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0]["name"], "Bench Press");
}

#[tokio::test]
async fn deleting_a_missing_workout_is_a_quiet_success() {
    let app = TestApp::spawn("delete-missing").await;
    let (_, bearer) = app.signup_and_login("deleter@example.com", "pw").await;

    let (status, body) = app
        .request("DELETE", "/workouts/424242", None, Some(&bearer))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Workout deleted successfully");
}

#[tokio::test]
async fn exercise_catalog_is_public_and_seeded() {
    let app = TestApp::spawn("catalog").await;

    let (status, body) = app.request("GET", "/exercises", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().expect("catalog array");
    assert_eq!(list.len(), 10);
    assert!(list.iter().all(|e| e["id"].as_i64().is_some()
        && e["name"].as_str().is_some_and(|n| !n.is_empty())));
    assert_eq!(list[0]["name"], "Bench Press");
}
