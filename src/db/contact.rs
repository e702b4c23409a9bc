use chrono::Utc;
use sqlx::SqlitePool;

use super::models::{ContactInput, ContactMessage};
use crate::error::ApiError;

const SELECT_COLUMNS: &str = "id, name, email, message, read, created_at";

/// Persistence for contact-form submissions.
#[derive(Debug, Clone)]
pub struct ContactStore {
    pool: SqlitePool,
}

impl ContactStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<ContactMessage>, ApiError> {
        let messages = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM contact_messages ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    pub async fn list_unread(&self) -> Result<Vec<ContactMessage>, ApiError> {
        let messages = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM contact_messages WHERE read = 0 ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    pub async fn get(&self, id: i64) -> Result<Option<ContactMessage>, ApiError> {
        let message = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM contact_messages WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(message)
    }

    pub async fn create(&self, input: ContactInput) -> Result<ContactMessage, ApiError> {
        let result = sqlx::query(
            "INSERT INTO contact_messages (name, email, message, read, created_at) \
             VALUES (?, ?, ?, 0, ?)",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.message)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get(id).await?.ok_or_else(|| sqlx::Error::RowNotFound.into())
    }

    /// Returns `true` when the message existed and is now marked read.
    pub async fn mark_read(&self, id: i64) -> Result<bool, ApiError> {
        let result = sqlx::query("UPDATE contact_messages SET read = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `true` when a row was actually deleted.
    pub async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
