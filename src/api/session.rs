//! Session cookie extraction
//!
//! `CurrentUser` is the auth guard for the REST surface: extracting it
//! fails with 401 unless the request carries a cookie whose token maps to
//! a live session row.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use crate::app::AppState;
use crate::db::UserRecord;

use super::error::ApiError;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "flickdeck_sid";

/// The authenticated user for this request
pub struct CurrentUser(pub UserRecord);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(ApiError::Unauthorized)?;

        let user = state
            .auth
            .resolve_session(&token)
            .await
            .map_err(ApiError::from)?
            .ok_or(ApiError::Unauthorized)?;

        Ok(CurrentUser(user))
    }
}
