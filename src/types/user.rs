//! Wire types for registration, login and token introspection.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Registration outcome. `email_sent` is `false` when the account was
/// created but the confirmation mail could not be delivered.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub email_sent: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The subset of an account that is safe to hand back to clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub confirmed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Echo of the verified claims, for clients that want to check a stored
/// token without triggering a real operation.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenIntrospection {
    pub id: i64,
    pub confirmed: bool,
}
