//! In-process store
//!
//! Keeps everything in maps behind a mutex. Selected with `database.url =
//! "memory://"` for local runs; also the store used by the test suite.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use chrono::Utc;
use crate::database::ChatStore;
use crate::models::{BlockedRecord, ChatRecord, ChatType, NewChat};
use crate::utils::errors::Result;

#[derive(Default)]
struct MemoryState {
    /// Keyed by insertion sequence so listing keeps insertion order
    chats: BTreeMap<u64, ChatRecord>,
    chat_index: HashMap<i64, u64>,
    next_seq: u64,
    users: HashSet<i64>,
    blocked: HashMap<i64, BlockedRecord>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A panic while holding the lock leaves the maps consistent; keep going.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Look up a blocked record
    pub fn blocked_record(&self, chat_id: i64) -> Option<BlockedRecord> {
        self.lock().blocked.get(&chat_id).cloned()
    }

    pub fn contains_chat(&self, chat_id: i64) -> bool {
        self.lock().chat_index.contains_key(&chat_id)
    }
}

impl ChatStore for MemoryStore {
    async fn record_chat(&self, chat: &NewChat) -> Result<bool> {
        let mut state = self.lock();
        if state.chat_index.contains_key(&chat.chat_id) {
            return Ok(false);
        }

        let seq = state.next_seq;
        state.next_seq += 1;
        state.chat_index.insert(chat.chat_id, seq);
        state.chats.insert(seq, ChatRecord {
            chat_id: chat.chat_id,
            title: chat.title.clone(),
            chat_type: chat.chat_type,
            created_at: Utc::now(),
        });
        Ok(true)
    }

    async fn record_user(&self, user_id: i64) -> Result<bool> {
        Ok(self.lock().users.insert(user_id))
    }

    async fn list_chats(&self) -> Result<Vec<ChatRecord>> {
        Ok(self.lock().chats.values().cloned().collect())
    }

    async fn remove_chat(&self, chat_id: i64) -> Result<bool> {
        let mut state = self.lock();
        match state.chat_index.remove(&chat_id) {
            Some(seq) => {
                state.chats.remove(&seq);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_blocked(&self, chat_id: i64, reason: &str) -> Result<()> {
        self.lock().blocked.insert(chat_id, BlockedRecord {
            chat_id,
            reason: Some(reason.to_string()),
            blocked_at: Utc::now(),
        });
        Ok(())
    }

    async fn count_chats(&self, chat_type: ChatType) -> Result<i64> {
        let count = self.lock().chats.values().filter(|c| c.chat_type == chat_type).count();
        Ok(count as i64)
    }

    async fn count_users(&self) -> Result<i64> {
        Ok(self.lock().users.len() as i64)
    }

    async fn count_blocked(&self) -> Result<i64> {
        Ok(self.lock().blocked.len() as i64)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
