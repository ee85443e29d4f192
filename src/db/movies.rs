//! Saved movies repository
//!
//! A saved movie is a denormalized copy of an upstream media summary,
//! owned by the user who added it. The `(user_id, tmdb_id)` unique index
//! is what makes "add the same movie twice" fail on the second attempt.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::sqlite_helpers::{json_to_vec, now_iso8601, vec_to_json};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedMovieRecord {
    pub id: String,
    pub user_id: String,
    pub tmdb_id: i64,
    pub media_type: String,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub genre_ids: Vec<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSavedMovie {
    pub tmdb_id: i64,
    #[serde(default = "default_media_type")]
    pub media_type: String,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

fn default_media_type() -> String {
    "movie".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSavedMovie {
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub genre_ids: Option<Vec<i64>>,
}

type SavedMovieRow = (
    String,         // id
    String,         // user_id
    i64,            // tmdb_id
    String,         // media_type
    String,         // title
    Option<String>, // poster_path
    Option<String>, // backdrop_path
    Option<String>, // overview
    Option<String>, // release_date
    Option<f64>,    // vote_average
    String,         // genre_ids json
    String,         // created_at
    String,         // updated_at
);

fn row_to_record(r: SavedMovieRow) -> SavedMovieRecord {
    SavedMovieRecord {
        id: r.0,
        user_id: r.1,
        tmdb_id: r.2,
        media_type: r.3,
        title: r.4,
        poster_path: r.5,
        backdrop_path: r.6,
        overview: r.7,
        release_date: r.8,
        vote_average: r.9,
        genre_ids: json_to_vec(&r.10),
        created_at: r.11,
        updated_at: r.12,
    }
}

const COLUMNS: &str = "id, user_id, tmdb_id, media_type, title, poster_path, backdrop_path, overview, release_date, vote_average, genre_ids, created_at, updated_at";

pub struct SavedMoviesRepository {
    pool: SqlitePool,
}

impl SavedMoviesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a saved movie for a user
    ///
    /// Returns the raw sqlx error so callers can map UNIQUE violations
    /// to a conflict response.
    pub async fn create(
        &self,
        user_id: &str,
        movie: CreateSavedMovie,
    ) -> Result<SavedMovieRecord, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = now_iso8601();
        let genre_ids = vec_to_json(&movie.genre_ids);

        sqlx::query(
            r#"
            INSERT INTO movies (id, user_id, tmdb_id, media_type, title, poster_path, backdrop_path, overview, release_date, vote_average, genre_ids, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(movie.tmdb_id)
        .bind(&movie.media_type)
        .bind(&movie.title)
        .bind(&movie.poster_path)
        .bind(&movie.backdrop_path)
        .bind(&movie.overview)
        .bind(&movie.release_date)
        .bind(movie.vote_average)
        .bind(&genre_ids)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(SavedMovieRecord {
            id,
            user_id: user_id.to_string(),
            tmdb_id: movie.tmdb_id,
            media_type: movie.media_type,
            title: movie.title,
            poster_path: movie.poster_path,
            backdrop_path: movie.backdrop_path,
            overview: movie.overview,
            release_date: movie.release_date,
            vote_average: movie.vote_average,
            genre_ids: movie.genre_ids,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// List a user's saved movies, newest first
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<SavedMovieRecord>> {
        let rows = sqlx::query_as::<_, SavedMovieRow>(&format!(
            "SELECT {COLUMNS} FROM movies WHERE user_id = ? ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }

    /// Get one saved movie, scoped to its owner
    pub async fn get_owned(&self, user_id: &str, id: &str) -> Result<Option<SavedMovieRecord>> {
        let row = sqlx::query_as::<_, SavedMovieRow>(&format!(
            "SELECT {COLUMNS} FROM movies WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_record))
    }

    /// Count how many of the given ids exist and belong to the user
    pub async fn count_owned(&self, user_id: &str, ids: &[String]) -> Result<i64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT COUNT(*) FROM movies WHERE user_id = ? AND id IN ({placeholders})"
        );
        let mut query = sqlx::query_as::<_, (i64,)>(&sql).bind(user_id);
        for id in ids {
            query = query.bind(id);
        }
        let (count,) = query.fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Update a saved movie, scoped to its owner
    pub async fn update_owned(
        &self,
        user_id: &str,
        id: &str,
        update: UpdateSavedMovie,
    ) -> Result<Option<SavedMovieRecord>> {
        let Some(existing) = self.get_owned(user_id, id).await? else {
            return Ok(None);
        };

        let title = update.title.unwrap_or(existing.title);
        let poster_path = update.poster_path.or(existing.poster_path);
        let backdrop_path = update.backdrop_path.or(existing.backdrop_path);
        let overview = update.overview.or(existing.overview);
        let release_date = update.release_date.or(existing.release_date);
        let vote_average = update.vote_average.or(existing.vote_average);
        let genre_ids = update.genre_ids.unwrap_or(existing.genre_ids);
        let now = now_iso8601();

        sqlx::query(
            r#"
            UPDATE movies
            SET title = ?, poster_path = ?, backdrop_path = ?, overview = ?,
                release_date = ?, vote_average = ?, genre_ids = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&title)
        .bind(&poster_path)
        .bind(&backdrop_path)
        .bind(&overview)
        .bind(&release_date)
        .bind(vote_average)
        .bind(vec_to_json(&genre_ids))
        .bind(&now)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(Some(SavedMovieRecord {
            id: existing.id,
            user_id: existing.user_id,
            tmdb_id: existing.tmdb_id,
            media_type: existing.media_type,
            title,
            poster_path,
            backdrop_path,
            overview,
            release_date,
            vote_average,
            genre_ids,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    /// Delete a saved movie, scoped to its owner
    pub async fn delete_owned(&self, user_id: &str, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all of a user's saved movies (account deletion)
    pub async fn delete_by_user(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM movies WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
