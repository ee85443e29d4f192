//! Server-side session store
//!
//! The browser cookie carries an opaque token; only its SHA-256 hash is
//! stored here, so a leaked database cannot be replayed as a session.

use anyhow::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::sqlite_helpers::now_iso8601;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRecord {
    pub id: String,
    pub user_id: String,
    pub token_hash: String,
    pub expires_at: String,
    pub created_at: String,
}

pub struct SessionsRepository {
    pool: SqlitePool,
}

impl SessionsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a session row for a user
    pub async fn create(
        &self,
        user_id: &str,
        token_hash: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<SessionRecord> {
        let id = Uuid::new_v4().to_string();
        let now = now_iso8601();
        let expires = expires_at.to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, token_hash, expires_at, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(token_hash)
        .bind(&expires)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(SessionRecord {
            id,
            user_id: user_id.to_string(),
            token_hash: token_hash.to_string(),
            expires_at: expires,
            created_at: now,
        })
    }

    /// Look up a live session by token hash
    ///
    /// Expired rows are treated as absent (and lazily removed).
    pub async fn get_live_by_token_hash(&self, token_hash: &str) -> Result<Option<SessionRecord>> {
        let row = sqlx::query_as::<_, SessionRecord>(
            "SELECT id, user_id, token_hash, expires_at, created_at FROM sessions WHERE token_hash = ?",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        let Some(session) = row else {
            return Ok(None);
        };

        let expired = chrono::DateTime::parse_from_rfc3339(&session.expires_at)
            .map(|t| t < chrono::Utc::now())
            .unwrap_or(true);

        if expired {
            self.delete_by_token_hash(token_hash).await?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Delete a session by token hash (logout)
    pub async fn delete_by_token_hash(&self, token_hash: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every session belonging to a user (account deletion)
    pub async fn delete_by_user(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
