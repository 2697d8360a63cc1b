use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::{debug, warn};

use crate::auth::jwt::JwtKeys;
use crate::auth::repo_types::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Classifies every request as authenticated or anonymous. Never rejects:
/// a missing header, a bad or expired token, an unknown user, or a store
/// error all resolve to `MaybeUser(None)` and it is up to the handler to
/// decide whether anonymous access is allowed.
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(resolve_user(parts, state).await))
    }
}

async fn resolve_user(parts: &Parts, state: &AppState) -> Option<User> {
    let auth_header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))?;

    let keys = JwtKeys::from_ref(state);
    let claims = match keys.verify(token) {
        Ok(c) => c,
        Err(e) => {
            debug!(error = %e, "invalid or expired token, treating as anonymous");
            return None;
        }
    };

    match User::find_by_id(&state.db, claims.sub).await {
        Ok(user) => user,
        Err(e) => {
            // store unreachable must not crash request handling
            warn!(error = %e, user_id = %claims.sub, "user lookup failed, treating as anonymous");
            None
        }
    }
}

/// Extractor for endpoints that require an authenticated caller.
pub struct RequireUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_user(parts, state)
            .await
            .map(RequireUser)
            .ok_or(ApiError::Unauthenticated)
    }
}
