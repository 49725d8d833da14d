//! Shared harness for route tests: the real router over a temp-file SQLite
//! database, one per test.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use liftlog::api::LogMailer;
use liftlog::auth::TokenKeys;
use liftlog::db::{self, ExerciseCatalog, UserStore, WorkoutStore};
use liftlog::router::{LiftState, lift_router};
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

pub const TEST_SECRET: &str = "route-test-secret";

/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: db::SqlitePool,
    pub keys: TokenKeys,
    db_path: PathBuf,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn spawn(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut db_path = std::env::temp_dir();
        db_path.push(format!(
            "liftlog-{tag}-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));

        let database_url = format!("sqlite:{}", db_path.display());
        let pool = db::connect(&database_url).await.expect("open test database");
        db::init_schema(&pool).await.expect("init schema");

        let catalog = ExerciseCatalog::new(pool.clone());
        catalog.seed_if_empty().await.expect("seed catalog");

        let keys = TokenKeys::new(TEST_SECRET);
        let state = LiftState {
            users: UserStore::new(pool.clone()),
            workouts: WorkoutStore::new(pool.clone()),
            catalog,
            keys: keys.clone(),
            mailer: Arc::new(LogMailer),
            public_base_url: Url::parse("http://localhost:3000").expect("base url"),
        };

        Self {
            router: lift_router(state),
            pool,
            keys,
            db_path,
        }
    }

    /// Sends one request through the router, returning status and decoded
    /// JSON body (`Null` when empty or not JSON).
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let body = match body {
            Some(v) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(serde_json::to_vec(&v).expect("serialize body"))
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("build request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Registers an account and returns the confirmation token straight from
    /// the store.
    pub async fn register(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/users/register",
                Some(serde_json::json!({
                    "first_name": "Test",
                    "last_name": "Lifter",
                    "email": email,
                    "password": password,
                })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        let (token,): (Option<String>,) =
            sqlx::query_as("SELECT confirmation_token FROM users WHERE email = ?")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .expect("read confirmation token");
        token.expect("confirmation token present after registration")
    }

    pub async fn confirm(&self, token: &str) {
        let (status, body) = self
            .request("GET", &format!("/users/validate/{token}"), None, None)
            .await;
        assert_eq!(status, StatusCode::OK, "confirm failed: {body}");
    }

    /// Full register -> confirm -> login; returns (user_id, bearer token).
    pub async fn signup_and_login(&self, email: &str, password: &str) -> (i64, String) {
        let token = self.register(email, password).await;
        self.confirm(&token).await;
        let (status, body) = self
            .request(
                "POST",
                "/users/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        let user_id = body["user"]["id"].as_i64().expect("user id");
        let bearer = body["token"].as_str().expect("token").to_string();
        (user_id, bearer)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db_path);
        let _ = fs::remove_file(format!("{}-wal", self.db_path.display()));
        let _ = fs::remove_file(format!("{}-shm", self.db_path.display()));
    }
}
