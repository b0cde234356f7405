//! Blocked chat repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::blocked::BlockedRecord;
use crate::utils::errors::HeraldError;

#[derive(Clone)]
pub struct BlockedRepository {
    pool: PgPool,
}

impl BlockedRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a chat as blocked, refreshing the reason if it already was
    pub async fn upsert(&self, chat_id: i64, reason: Option<&str>) -> Result<(), HeraldError> {
        sqlx::query(
            r#"
            INSERT INTO blocked (chat_id, reason, blocked_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (chat_id) DO UPDATE
            SET reason = EXCLUDED.reason,
                blocked_at = EXCLUDED.blocked_at
            "#
        )
        .bind(chat_id)
        .bind(reason)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find(&self, chat_id: i64) -> Result<Option<BlockedRecord>, HeraldError> {
        let record = sqlx::query_as::<_, BlockedRecord>(
            "SELECT chat_id, reason, blocked_at FROM blocked WHERE chat_id = $1"
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Count blocked chats
    pub async fn count(&self) -> Result<i64, HeraldError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blocked")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
