use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::{info, warn};

use crate::auth;
use crate::db::models::NewUser;
use crate::error::LiftError;
use crate::middleware::CurrentUser;
use crate::router::LiftState;
use crate::types::MessageResponse;
use crate::types::user::{
    LoginRequest, LoginResponse, PublicUser, RegisterRequest, RegisterResponse,
    TokenIntrospection,
};

/// POST /users/register -> create an unconfirmed account and send the
/// confirmation link.
///
/// Mail failure does not undo the insert: the account stays pending and the
/// response carries `email_sent: false` instead of an error.
pub async fn register(
    State(state): State<LiftState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), LiftError> {
    let Json(req) = payload.map_err(|rej| LiftError::Validation(rej.body_text()))?;
    if req.first_name.trim().is_empty()
        || req.last_name.trim().is_empty()
        || req.email.trim().is_empty()
        || req.password.is_empty()
    {
        return Err(LiftError::Validation("all fields are required".into()));
    }

    let password_hash = auth::password::hash(&req.password)?;
    let token = auth::confirmation_token();
    let user_id = state
        .users
        .insert_unconfirmed(&NewUser {
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            password_hash,
            confirmation_token: token.clone(),
        })
        .await?;

    let link = state
        .public_base_url
        .join(&format!("users/validate/{token}"))?;
    let email_sent = match state
        .mailer
        .send_confirmation(&req.email, &req.first_name, &link)
        .await
    {
        Ok(()) => true,
        Err(e) => {
            warn!(user_id, error = %e, "confirmation mail failed, account stays pending");
            false
        }
    };

    info!(user_id, email_sent, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully. Please validate your email.".into(),
            email_sent,
        }),
    ))
}

/// POST /users/login -> check the account and issue a bearer token.
pub async fn login(
    State(state): State<LiftState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, LiftError> {
    let Json(req) = payload.map_err(|rej| LiftError::Validation(rej.body_text()))?;
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(LiftError::Validation(
            "email and password are required".into(),
        ));
    }

    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(LiftError::UserNotFound)?;

    // unconfirmed accounts are turned away before the password is checked
    if !user.confirmed {
        return Err(LiftError::Unconfirmed);
    }
    if !auth::password::verify(&req.password, &user.password_hash)? {
        return Err(LiftError::WrongPassword);
    }

    let token = state.keys.issue(user.id, user.confirmed)?;
    info!(user_id = user.id, "login succeeded");
    Ok(Json(LoginResponse {
        token,
        user: PublicUser {
            id: user.id,
            email: user.email,
            confirmed: user.confirmed,
        },
    }))
}

/// GET /users/validate/{token} -> one-shot account confirmation.
pub async fn confirm_account(
    State(state): State<LiftState>,
    Path(token): Path<String>,
) -> Result<Json<MessageResponse>, LiftError> {
    if !state.users.confirm_by_token(&token).await? {
        return Err(LiftError::ConfirmationInvalid);
    }
    info!("account confirmed");
    Ok(Json(MessageResponse::new(
        "Your email has been successfully validated. You can now log in!",
    )))
}

/// POST /users/logout -> stateless acknowledgement; tokens expire on their own.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logout successful"))
}

/// POST /users/validate-token -> echo the verified claims back.
pub async fn validate_token(CurrentUser(claims): CurrentUser) -> Json<TokenIntrospection> {
    Json(TokenIntrospection {
        id: claims.id,
        confirmed: claims.confirmed,
    })
}
