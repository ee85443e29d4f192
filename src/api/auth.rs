//! Account routes: register, login, logout, delete

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::app::AppState;
use crate::services::RegisterInput;

use super::error::ApiError;
use super::session::{CurrentUser, SESSION_COOKIE};

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

fn session_cookie(token: String) -> Cookie<'static> {
    // No Max-Age: the browser keeps it for the browsing session while the
    // server-side expiry bounds its real lifetime.
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn expired_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// POST /api/auth/register
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/auth/login
///
/// Establishes a session and sets the session cookie. Failure leaves no
/// session behind and does not distinguish unknown email from wrong
/// password.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (user, session) = state.auth.login(&request.email, &request.password).await?;
    tracing::info!(user_id = %user.id, "User logged in");
    let jar = jar.add(session_cookie(session.token));
    Ok((jar, Json(user)))
}

/// POST /api/auth/logout (idempotent)
async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.auth.logout(cookie.value()).await?;
    }
    let jar = jar.remove(expired_cookie());
    Ok((jar, StatusCode::NO_CONTENT))
}

/// GET /api/auth/me
async fn me(CurrentUser(user): CurrentUser) -> Json<crate::db::UserRecord> {
    Json(user)
}

/// DELETE /api/auth/delete
///
/// Deletes the account and everything it owns: saved movies, lists, and
/// all sessions.
async fn delete_account(
    State(state): State<AppState>,
    jar: CookieJar,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    state.auth.delete_account(&user.id).await?;
    let jar = jar.remove(expired_cookie());
    Ok((jar, StatusCode::NO_CONTENT))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route("/auth/delete", delete(delete_account))
}
