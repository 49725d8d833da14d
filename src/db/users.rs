use crate::db::SqlitePool;
use crate::db::models::{NewUser, UserRow};
use crate::error::LiftError;

/// Account rows keyed by unique email.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts an unconfirmed account and returns its id. A duplicate email
    /// surfaces as [`LiftError::EmailTaken`] via the unique index.
    pub async fn insert_unconfirmed(&self, user: &NewUser) -> Result<i64, LiftError> {
        let res = sqlx::query(
            r#"INSERT INTO users (first_name, last_name, email, password_hash, confirmed, confirmation_token)
               VALUES (?, ?, ?, ?, 0, ?)"#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.confirmation_token)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                LiftError::EmailTaken
            } else {
                LiftError::Database(e)
            }
        })?;
        Ok(res.last_insert_rowid())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, LiftError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"SELECT id, first_name, last_name, email, password_hash, confirmed, confirmation_token
               FROM users WHERE email = ?"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Marks the matching account confirmed and burns the token in one
    /// statement. Returns `false` when the token matches no pending
    /// registration, including a token that was already used.
    pub async fn confirm_by_token(&self, token: &str) -> Result<bool, LiftError> {
        let res = sqlx::query(
            "UPDATE users SET confirmed = 1, confirmation_token = NULL WHERE confirmation_token = ?",
        )
        .bind(token)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}
