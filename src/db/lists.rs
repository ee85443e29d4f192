//! Watchlists repository
//!
//! A list holds an ordered array of saved-movie ids (JSON-encoded, the
//! order is the user's drag-and-drop order). List names are unique per
//! owner.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::sqlite_helpers::{json_to_vec, now_iso8601, vec_to_json};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub movie_ids: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateList {
    pub name: String,
    #[serde(default, alias = "movies")]
    pub movie_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateList {
    pub name: Option<String>,
    #[serde(alias = "movies")]
    pub movie_ids: Option<Vec<String>>,
}

type ListRow = (String, String, String, String, String, String);

fn row_to_record(r: ListRow) -> ListRecord {
    ListRecord {
        id: r.0,
        user_id: r.1,
        name: r.2,
        movie_ids: json_to_vec(&r.3),
        created_at: r.4,
        updated_at: r.5,
    }
}

const COLUMNS: &str = "id, user_id, name, movie_ids, created_at, updated_at";

pub struct ListsRepository {
    pool: SqlitePool,
}

impl ListsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a list for a user
    pub async fn create(&self, user_id: &str, list: CreateList) -> Result<ListRecord, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = now_iso8601();

        sqlx::query(
            r#"
            INSERT INTO lists (id, user_id, name, movie_ids, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(&list.name)
        .bind(vec_to_json(&list.movie_ids))
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(ListRecord {
            id,
            user_id: user_id.to_string(),
            name: list.name,
            movie_ids: list.movie_ids,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// List a user's lists, newest first
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<ListRecord>> {
        let rows = sqlx::query_as::<_, ListRow>(&format!(
            "SELECT {COLUMNS} FROM lists WHERE user_id = ? ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }

    /// Get one list, scoped to its owner
    pub async fn get_owned(&self, user_id: &str, id: &str) -> Result<Option<ListRecord>> {
        let row = sqlx::query_as::<_, ListRow>(&format!(
            "SELECT {COLUMNS} FROM lists WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_record))
    }

    /// Update a list's name and/or ordered movie ids, scoped to its owner
    pub async fn update_owned(
        &self,
        user_id: &str,
        id: &str,
        update: UpdateList,
    ) -> Result<Option<ListRecord>, sqlx::Error> {
        let existing = sqlx::query_as::<_, ListRow>(&format!(
            "SELECT {COLUMNS} FROM lists WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(existing) = existing.map(row_to_record) else {
            return Ok(None);
        };

        let name = update.name.unwrap_or(existing.name);
        let movie_ids = update.movie_ids.unwrap_or(existing.movie_ids);
        let now = now_iso8601();

        sqlx::query(
            "UPDATE lists SET name = ?, movie_ids = ?, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(&name)
        .bind(vec_to_json(&movie_ids))
        .bind(&now)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(Some(ListRecord {
            id: existing.id,
            user_id: existing.user_id,
            name,
            movie_ids,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    /// Delete a list, scoped to its owner
    pub async fn delete_owned(&self, user_id: &str, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM lists WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all of a user's lists (account deletion)
    pub async fn delete_by_user(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM lists WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Remove a saved-movie id from every list the user owns
    ///
    /// Called when a saved movie is deleted so lists do not keep dangling
    /// references.
    pub async fn remove_movie_everywhere(&self, user_id: &str, movie_id: &str) -> Result<()> {
        let lists = self.list_by_user(user_id).await?;
        for list in lists {
            if list.movie_ids.iter().any(|m| m == movie_id) {
                let remaining: Vec<String> = list
                    .movie_ids
                    .into_iter()
                    .filter(|m| m != movie_id)
                    .collect();
                sqlx::query("UPDATE lists SET movie_ids = ?, updated_at = ? WHERE id = ?")
                    .bind(vec_to_json(&remaining))
                    .bind(now_iso8601())
                    .bind(&list.id)
                    .execute(&self.pool)
                    .await?;
            }
        }
        Ok(())
    }
}
