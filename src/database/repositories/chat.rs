//! Chat repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::chat::{ChatRecord, ChatType, NewChat};
use crate::utils::errors::HeraldError;

#[derive(Clone)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a chat unless it is already known. Returns true when a row was created.
    pub async fn insert_if_absent(&self, chat: &NewChat) -> Result<bool, HeraldError> {
        let result = sqlx::query(
            r#"
            INSERT INTO chats (chat_id, title, chat_type, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (chat_id) DO NOTHING
            "#
        )
        .bind(chat.chat_id)
        .bind(chat.title.as_deref())
        .bind(chat.chat_type.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Find chat by Telegram ID
    pub async fn find(&self, chat_id: i64) -> Result<Option<ChatRecord>, HeraldError> {
        let chat = sqlx::query_as::<_, ChatRecord>(
            "SELECT chat_id, title, chat_type, created_at FROM chats WHERE chat_id = $1"
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(chat)
    }

    /// List every chat, oldest first
    pub async fn list(&self) -> Result<Vec<ChatRecord>, HeraldError> {
        let chats = sqlx::query_as::<_, ChatRecord>(
            "SELECT chat_id, title, chat_type, created_at FROM chats ORDER BY created_at ASC, chat_id ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(chats)
    }

    /// Delete chat. Returns true when a row was removed.
    pub async fn delete(&self, chat_id: i64) -> Result<bool, HeraldError> {
        let result = sqlx::query("DELETE FROM chats WHERE chat_id = $1")
            .bind(chat_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count chats of one type
    pub async fn count_by_type(&self, chat_type: ChatType) -> Result<i64, HeraldError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chats WHERE chat_type = $1")
            .bind(chat_type.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
