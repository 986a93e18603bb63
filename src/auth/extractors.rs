use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::jwt::JwtKeys;
use crate::{db::User, error::ApiError, state::AppState};

/// Authenticated identity resolved from the bearer token.
///
/// The token must both verify cryptographically and match the user's stored
/// session token exactly, so a token from a superseded session is rejected
/// even while still unexpired.
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::Auth("Access denied. No token provided.".into()))?;

        let token = header.strip_prefix("Bearer ").unwrap_or(header);
        if token.is_empty() {
            return Err(ApiError::Auth("Access denied. No token provided.".into()));
        }

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|_| {
            warn!("bearer token failed verification");
            ApiError::Auth("Please authenticate.".into())
        })?;

        let user = User::find_by_id_and_token(&state.db, claims.sub, token)
            .await
            .map_err(|_| ApiError::Auth("Please authenticate.".into()))?
            .ok_or_else(|| {
                warn!(user_id = %claims.sub, "token does not match current session");
                ApiError::Auth("Invalid token.".into())
            })?;

        Ok(CurrentUser {
            user,
            token: token.to_string(),
        })
    }
}
