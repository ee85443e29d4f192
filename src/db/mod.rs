//! Database connection and repositories

pub mod lists;
pub mod movies;
pub mod sessions;
pub mod sqlite_helpers;
pub mod users;

use std::str::FromStr;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub use lists::{CreateList, ListRecord, ListsRepository, UpdateList};
pub use movies::{CreateSavedMovie, SavedMovieRecord, SavedMoviesRepository, UpdateSavedMovie};
pub use sessions::{SessionRecord, SessionsRepository};
pub use users::{CreateUser, UserRecord, UsersRepository};

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a connection pool and ensure the schema exists
    pub async fn connect(url: &str) -> Result<Self> {
        let url = if url.starts_with("sqlite") {
            url.to_string()
        } else {
            format!("sqlite://{}", url)
        };

        let options = SqliteConnectOptions::from_str(&url)?.create_if_missing(true);

        // An in-memory database is per-connection, so the pool must not
        // hand out more than one.
        let max_connections = if url.contains(":memory:") { 1 } else { 10 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init_schema().await?;
        Ok(db)
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn users(&self) -> UsersRepository {
        UsersRepository::new(self.pool.clone())
    }

    pub fn sessions(&self) -> SessionsRepository {
        SessionsRepository::new(self.pool.clone())
    }

    pub fn movies(&self) -> SavedMoviesRepository {
        SavedMoviesRepository::new(self.pool.clone())
    }

    pub fn lists(&self) -> ListsRepository {
        ListsRepository::new(self.pool.clone())
    }

    /// Create tables that do not exist yet
    ///
    /// Idempotent; runs at startup. Uniqueness constraints back the
    /// duplicate checks in the API handlers, so a race between
    /// check-and-insert still cannot produce duplicate rows.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE COLLATE NOCASE,
                email TEXT NOT NULL UNIQUE COLLATE NOCASE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                token_hash TEXT NOT NULL UNIQUE,
                expires_at TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS movies (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                tmdb_id INTEGER NOT NULL,
                media_type TEXT NOT NULL DEFAULT 'movie',
                title TEXT NOT NULL,
                poster_path TEXT,
                backdrop_path TEXT,
                overview TEXT,
                release_date TEXT,
                vote_average REAL,
                genre_ids TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE(user_id, tmdb_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS lists (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                movie_ids TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE(user_id, name)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// True when a sqlx error is a UNIQUE constraint violation
///
/// Used by handlers to turn a lost check-then-insert race into the same
/// conflict response as the pre-check.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.message().contains("UNIQUE constraint failed"),
        _ => false,
    }
}
