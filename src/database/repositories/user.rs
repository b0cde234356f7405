//! User repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::user::UserRecord;
use crate::utils::errors::HeraldError;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user unless already known. Returns true when a row was created.
    pub async fn insert_if_absent(&self, user_id: i64) -> Result<bool, HeraldError> {
        let result = sqlx::query(
            "INSERT INTO users (user_id, created_at) VALUES ($1, $2) ON CONFLICT (user_id) DO NOTHING"
        )
        .bind(user_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Find user by Telegram ID
    pub async fn find(&self, user_id: i64) -> Result<Option<UserRecord>, HeraldError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT user_id, created_at FROM users WHERE user_id = $1"
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, HeraldError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
