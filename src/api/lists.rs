//! Watchlist routes
//!
//! Lists reference saved movies by id; creating or updating a list
//! verifies every referenced id is an owned saved movie first.

use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app::AppState;
use crate::db::{is_unique_violation, CreateList, UpdateList};

use super::error::ApiError;
use super::session::CurrentUser;

/// Verify every referenced movie id exists and belongs to the user
async fn check_movies_owned(
    state: &AppState,
    user_id: &str,
    movie_ids: &[String],
) -> Result<(), ApiError> {
    let distinct: Vec<String> = movie_ids
        .iter()
        .cloned()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let owned = state.db.movies().count_owned(user_id, &distinct).await?;
    if owned as usize != distinct.len() {
        return Err(ApiError::NotFound("Some movies not found".to_string()));
    }
    Ok(())
}

/// GET /api/lists
async fn list_lists(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let lists = state.db.lists().list_by_user(&user.id).await?;
    Ok(Json(lists))
}

/// POST /api/lists
async fn create_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<CreateList>,
) -> Result<impl IntoResponse, ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required".to_string()));
    }
    check_movies_owned(&state, &user.id, &input.movie_ids).await?;

    match state.db.lists().create(&user.id, input).await {
        Ok(list) => Ok((StatusCode::CREATED, Json(list))),
        Err(err) if is_unique_violation(&err) => {
            Err(ApiError::Conflict("List name already in use".to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /api/lists/{id}
async fn get_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let list = state
        .db
        .lists()
        .get_owned(&user.id, &id)
        .await?
        .ok_or_else(ApiError::not_found)?;
    Ok(Json(list))
}

/// PUT /api/lists/{id}
///
/// Accepts a new name and/or a reordered/replaced movie id array.
async fn update_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(update): Json<UpdateList>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(ApiError::Validation("name must not be empty".to_string()));
        }
    }
    if let Some(movie_ids) = &update.movie_ids {
        check_movies_owned(&state, &user.id, movie_ids).await?;
    }

    match state.db.lists().update_owned(&user.id, &id, update).await {
        Ok(Some(list)) => Ok(Json(list)),
        Ok(None) => Err(ApiError::not_found()),
        Err(err) if is_unique_violation(&err) => {
            Err(ApiError::Conflict("List name already in use".to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

/// DELETE /api/lists/{id}
async fn delete_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.db.lists().delete_owned(&user.id, &id).await?;
    if !deleted {
        return Err(ApiError::not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lists", get(list_lists).post(create_list))
        .route(
            "/lists/{id}",
            get(get_list).put(update_list).delete(delete_list),
        )
}
