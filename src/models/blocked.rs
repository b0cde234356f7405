//! Blocked chat model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A chat that could not be reached during a broadcast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BlockedRecord {
    pub chat_id: i64,
    pub reason: Option<String>,
    pub blocked_at: DateTime<Utc>,
}

/// Aggregate counts reported by /stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatStats {
    pub groups: i64,
    pub private_chats: i64,
    pub users: i64,
    pub blocked: i64,
}
