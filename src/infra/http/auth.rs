//! Session boundary: resolve the identity injected by the auth collaborator.
//!
//! The session service in front of brusio authenticates requests and
//! forwards the resolved username in a trusted header. Requests without the
//! header are anonymous; a header naming an unknown user is rejected.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::application::auth::RequestUser;

use super::error::ApiError;
use super::HttpState;

pub const SESSION_USER_HEADER: &str = "x-brusio-user";

impl FromRequestParts<HttpState> for RequestUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &HttpState,
    ) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(SESSION_USER_HEADER) else {
            return Ok(RequestUser::Anonymous);
        };

        let username = raw.to_str().map_err(|_| ApiError::unauthorized())?;
        let user = state
            .users
            .find_by_username(username)
            .await
            .map_err(ApiError::from)?;

        user.map(RequestUser::Authenticated)
            .ok_or_else(ApiError::unauthorized)
    }
}
