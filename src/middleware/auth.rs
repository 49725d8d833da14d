use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use headers::Authorization;
use headers::authorization::Bearer;

use crate::auth::AuthClaims;
use crate::error::LiftError;
use crate::router::LiftState;

/// Verified identity attached to a gated request.
///
/// A missing or unreadable `Authorization` header and a failed verification
/// are distinct outcomes (`token_required` vs `token_invalid`), so clients
/// can tell "log in" apart from "log in again".
///
/// Claims are trusted as-is for the request lifetime; they are not
/// re-checked against the store, so state changes after issuance become
/// visible only on the next login.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthClaims);

impl FromRequestParts<LiftState> for CurrentUser {
    type Rejection = LiftError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &LiftState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|rejection| {
                if rejection.is_missing() {
                    LiftError::TokenRequired
                } else {
                    LiftError::TokenInvalid
                }
            })?;
        let claims = state.keys.verify(bearer.token())?;
        Ok(CurrentUser(claims))
    }
}
