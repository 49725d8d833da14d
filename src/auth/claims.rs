use crate::error::LiftError;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Fixed session lifetime: one hour.
pub const TOKEN_TTL_SECS: u64 = 3600;

/// Claims carried by a session token.
///
/// `confirmed` mirrors the account's state at issuance and is trusted as-is
/// for the token's lifetime; a confirmation happening after login becomes
/// visible on the next login, not mid-session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthClaims {
    pub id: i64,
    pub confirmed: bool,
    pub iat: u64,
    pub exp: u64,
}

/// HS256 signing/verification keys derived from the configured secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a signed bearer token for the given account.
    pub fn issue(&self, user_id: i64, confirmed: bool) -> Result<String, LiftError> {
        let now = jsonwebtoken::get_current_timestamp();
        let claims = AuthClaims {
            id: user_id,
            confirmed,
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| LiftError::Internal(format!("token signing failed: {e}")))
    }

    /// Checks signature and expiry. Every failure mode collapses into
    /// [`LiftError::TokenInvalid`]; callers never learn which check failed.
    pub fn verify(&self, token: &str) -> Result<AuthClaims, LiftError> {
        decode::<AuthClaims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| LiftError::TokenInvalid)
    }
}
