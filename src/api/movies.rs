//! Saved-movie routes (the per-user watchlist pool)
//!
//! Every route is owner-scoped: a record that is missing or belongs to
//! someone else uniformly yields a generic 404.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app::AppState;
use crate::db::{is_unique_violation, CreateSavedMovie, UpdateSavedMovie};

use super::error::ApiError;
use super::session::CurrentUser;

/// GET /api/movies
async fn list_movies(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let movies = state.db.movies().list_by_user(&user.id).await?;
    Ok(Json(movies))
}

/// POST /api/movies
async fn add_movie(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<CreateSavedMovie>,
) -> Result<impl IntoResponse, ApiError> {
    if input.title.trim().is_empty() {
        return Err(ApiError::Validation("title is required".to_string()));
    }
    if input.tmdb_id <= 0 {
        return Err(ApiError::Validation(
            "tmdb_id must be a positive integer".to_string(),
        ));
    }

    match state.db.movies().create(&user.id, input).await {
        Ok(movie) => Ok((StatusCode::CREATED, Json(movie))),
        Err(err) if is_unique_violation(&err) => {
            Err(ApiError::Conflict("Movie already added".to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /api/movies/{id}
async fn get_movie(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let movie = state
        .db
        .movies()
        .get_owned(&user.id, &id)
        .await?
        .ok_or_else(ApiError::not_found)?;
    Ok(Json(movie))
}

/// PUT /api/movies/{id}
async fn update_movie(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(update): Json<UpdateSavedMovie>,
) -> Result<impl IntoResponse, ApiError> {
    let movie = state
        .db
        .movies()
        .update_owned(&user.id, &id, update)
        .await?
        .ok_or_else(ApiError::not_found)?;
    Ok(Json(movie))
}

/// DELETE /api/movies/{id}
///
/// Also drops the id from every list the owner has, so lists never hold
/// dangling references.
async fn delete_movie(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.db.movies().delete_owned(&user.id, &id).await?;
    if !deleted {
        return Err(ApiError::not_found());
    }
    state.db.lists().remove_movie_everywhere(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movies", get(list_movies).post(add_movie))
        .route(
            "/movies/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
}
