use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error as ThisError;
use tracing::error;

/// Request-level error for every fallible operation in the service.
///
/// The taxonomy keeps "you are not who you claim" (token/password variants),
/// "what you asked for is absent or not allowed yet" (not-found/unconfirmed)
/// and "the system itself failed" (database/internal) as distinct outcomes,
/// because clients retry, re-authenticate or give up based on which one they
/// got.
#[derive(Debug, ThisError)]
pub enum LiftError {
    /// Malformed or missing input, rejected before the store is touched.
    #[error("{0}")]
    Validation(String),

    /// Unique-email constraint violation on registration.
    #[error("email is already registered")]
    EmailTaken,

    /// Login attempted with an email no user has.
    #[error("user not found")]
    UserNotFound,

    /// Confirmation link token matches no pending registration.
    #[error("invalid or expired confirmation token")]
    ConfirmationInvalid,

    /// No bearer credential on a gated request.
    #[error("authentication required")]
    TokenRequired,

    /// Bearer credential present but tampered, malformed or expired.
    #[error("invalid or expired token")]
    TokenInvalid,

    /// Password verification failed.
    #[error("invalid credentials")]
    WrongPassword,

    /// Account exists but the email was never confirmed.
    #[error("please confirm your email before logging in")]
    Unconfirmed,

    /// Authenticated, but the claim does not grant access to this resource.
    #[error("{0}")]
    Forbidden(String),

    #[error("url parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("mail delivery error: {0}")]
    Mail(#[from] reqwest::Error),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for LiftError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            LiftError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody::new("validation", msg),
            ),
            LiftError::EmailTaken => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody::new("email_taken", &self.to_string()),
            ),
            LiftError::ConfirmationInvalid => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody::new("confirmation_invalid", &self.to_string()),
            ),
            LiftError::UserNotFound => (
                StatusCode::NOT_FOUND,
                ApiErrorBody::new("user_not_found", &self.to_string()),
            ),
            LiftError::TokenRequired => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody::new("token_required", &self.to_string()),
            ),
            LiftError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody::new("token_invalid", &self.to_string()),
            ),
            LiftError::WrongPassword => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody::new("bad_credentials", &self.to_string()),
            ),
            LiftError::Unconfirmed => (
                StatusCode::FORBIDDEN,
                ApiErrorBody::new("unconfirmed", &self.to_string()),
            ),
            LiftError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, ApiErrorBody::new("forbidden", msg))
            }
            LiftError::UrlParse(e) => {
                error!(error = %e, "url construction failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody::new("internal_error", "an internal server error occurred"),
                )
            }
            LiftError::Database(e) => {
                error!(error = %e, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody::new("internal_error", "an internal server error occurred"),
                )
            }
            LiftError::Internal(msg) => {
                error!(error = %msg, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody::new("internal_error", "an internal server error occurred"),
                )
            }
            LiftError::Mail(e) => {
                error!(error = %e, "mail delivery failure");
                (
                    StatusCode::BAD_GATEWAY,
                    ApiErrorBody::new("mail_error", "notification service unavailable"),
                )
            }
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body.
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiErrorBody {
    fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
