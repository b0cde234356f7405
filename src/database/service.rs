//! Database service layer
//!
//! This module provides a high-level interface to database operations

use tracing::debug;
use crate::database::{health_check, ChatRepository, ChatStore, BlockedRepository, DatabasePool, UserRepository};
use crate::models::*;
use crate::utils::errors::HeraldError;

#[derive(Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
    pub chats: ChatRepository,
    pub users: UserRepository,
    pub blocked: BlockedRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            chats: ChatRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            blocked: BlockedRepository::new(pool.clone()),
            pool,
        }
    }
}

impl ChatStore for DatabaseService {
    async fn record_chat(&self, chat: &NewChat) -> Result<bool, HeraldError> {
        let inserted = self.chats.insert_if_absent(chat).await?;
        debug!(chat_id = chat.chat_id, inserted = inserted, "Chat recorded");
        Ok(inserted)
    }

    async fn record_user(&self, user_id: i64) -> Result<bool, HeraldError> {
        self.users.insert_if_absent(user_id).await
    }

    async fn list_chats(&self) -> Result<Vec<ChatRecord>, HeraldError> {
        self.chats.list().await
    }

    async fn remove_chat(&self, chat_id: i64) -> Result<bool, HeraldError> {
        self.chats.delete(chat_id).await
    }

    async fn mark_blocked(&self, chat_id: i64, reason: &str) -> Result<(), HeraldError> {
        self.blocked.upsert(chat_id, Some(reason)).await
    }

    async fn count_chats(&self, chat_type: ChatType) -> Result<i64, HeraldError> {
        self.chats.count_by_type(chat_type).await
    }

    async fn count_users(&self) -> Result<i64, HeraldError> {
        self.users.count().await
    }

    async fn count_blocked(&self) -> Result<i64, HeraldError> {
        self.blocked.count().await
    }

    async fn health_check(&self) -> Result<(), HeraldError> {
        health_check(&self.pool).await
    }
}
