//! Storage abstraction shared by handlers and the broadcaster
//!
//! `ChatStore` is implemented by the PostgreSQL-backed [`DatabaseService`] and
//! by the in-process [`MemoryStore`]; [`Store`] picks one at start-up.

use std::future::Future;
use tracing::info;
use crate::config::Settings;
use crate::database::connection::{create_pool, run_migrations};
use crate::database::{DatabaseService, MemoryStore};
use crate::models::{ChatRecord, ChatType, NewChat};
use crate::utils::errors::Result;

/// Persistence operations for chats, users and blocked chats
pub trait ChatStore: Send + Sync {
    /// Insert the chat if it is not known yet; true when it was inserted
    fn record_chat(&self, chat: &NewChat) -> impl Future<Output = Result<bool>> + Send;

    /// Insert the user if it is not known yet; true when it was inserted
    fn record_user(&self, user_id: i64) -> impl Future<Output = Result<bool>> + Send;

    /// All chats in insertion order
    fn list_chats(&self) -> impl Future<Output = Result<Vec<ChatRecord>>> + Send;

    /// Forget a chat; true when it existed
    fn remove_chat(&self, chat_id: i64) -> impl Future<Output = Result<bool>> + Send;

    fn mark_blocked(&self, chat_id: i64, reason: &str) -> impl Future<Output = Result<()>> + Send;

    fn count_chats(&self, chat_type: ChatType) -> impl Future<Output = Result<i64>> + Send;

    fn count_users(&self) -> impl Future<Output = Result<i64>> + Send;

    fn count_blocked(&self) -> impl Future<Output = Result<i64>> + Send;

    fn health_check(&self) -> impl Future<Output = Result<()>> + Send;
}

/// Store selected by configuration
#[derive(Clone)]
pub enum Store {
    Postgres(DatabaseService),
    Memory(MemoryStore),
}

impl Store {
    /// Connect the configured backend, running migrations for PostgreSQL
    pub async fn connect(settings: &Settings) -> Result<Self> {
        if settings.uses_memory_store() {
            info!("Using in-memory store; data is lost on restart");
            return Ok(Store::Memory(MemoryStore::new()));
        }

        let pool = create_pool(&settings.database).await?;
        run_migrations(&pool).await?;

        Ok(Store::Postgres(DatabaseService::new(pool)))
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Store::Postgres(_) => "postgres",
            Store::Memory(_) => "memory",
        }
    }
}

impl ChatStore for Store {
    async fn record_chat(&self, chat: &NewChat) -> Result<bool> {
        match self {
            Store::Postgres(db) => db.record_chat(chat).await,
            Store::Memory(mem) => mem.record_chat(chat).await,
        }
    }

    async fn record_user(&self, user_id: i64) -> Result<bool> {
        match self {
            Store::Postgres(db) => db.record_user(user_id).await,
            Store::Memory(mem) => mem.record_user(user_id).await,
        }
    }

    async fn list_chats(&self) -> Result<Vec<ChatRecord>> {
        match self {
            Store::Postgres(db) => db.list_chats().await,
            Store::Memory(mem) => mem.list_chats().await,
        }
    }

    async fn remove_chat(&self, chat_id: i64) -> Result<bool> {
        match self {
            Store::Postgres(db) => db.remove_chat(chat_id).await,
            Store::Memory(mem) => mem.remove_chat(chat_id).await,
        }
    }

    async fn mark_blocked(&self, chat_id: i64, reason: &str) -> Result<()> {
        match self {
            Store::Postgres(db) => db.mark_blocked(chat_id, reason).await,
            Store::Memory(mem) => mem.mark_blocked(chat_id, reason).await,
        }
    }

    async fn count_chats(&self, chat_type: ChatType) -> Result<i64> {
        match self {
            Store::Postgres(db) => db.count_chats(chat_type).await,
            Store::Memory(mem) => mem.count_chats(chat_type).await,
        }
    }

    async fn count_users(&self) -> Result<i64> {
        match self {
            Store::Postgres(db) => db.count_users().await,
            Store::Memory(mem) => mem.count_users().await,
        }
    }

    async fn count_blocked(&self) -> Result<i64> {
        match self {
            Store::Postgres(db) => db.count_blocked().await,
            Store::Memory(mem) => mem.count_blocked().await,
        }
    }

    async fn health_check(&self) -> Result<()> {
        match self {
            Store::Postgres(db) => db.health_check().await,
            Store::Memory(mem) => mem.health_check().await,
        }
    }
}
