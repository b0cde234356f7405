//! Chat and user registry
//!
//! Every incoming message registers its chat and its (human) sender before any
//! command runs, so the broadcast audience grows as the bot is used.

use teloxide::types::Message;
use crate::database::ChatStore;
use crate::models::{ChatType, NewChat};
use crate::utils::errors::Result;
use crate::utils::logging::log_chat_recorded;

/// What a registration added to the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registration {
    pub new_chat: bool,
    pub new_user: bool,
    pub chat_type: Option<ChatType>,
}

impl Registration {
    /// A private chat seen for the first time, which is announced as #NewUser
    pub fn is_new_private_chat(&self) -> bool {
        self.new_chat && self.chat_type == Some(ChatType::Private)
    }
}

pub async fn register_message<S: ChatStore>(store: &S, msg: &Message) -> Result<Registration> {
    let sender = msg
        .from
        .as_ref()
        .filter(|user| !user.is_bot)
        .map(|user| user.id.0 as i64);

    register(store, NewChat::from_chat(&msg.chat), sender).await
}

pub async fn register<S: ChatStore>(store: &S, chat: NewChat, sender: Option<i64>) -> Result<Registration> {
    let new_chat = store.record_chat(&chat).await?;
    if new_chat {
        log_chat_recorded(chat.chat_id, chat.chat_type.as_str(), chat.title.as_deref());
    }

    let new_user = match sender {
        Some(user_id) => store.record_user(user_id).await?,
        None => false,
    };

    Ok(Registration {
        new_chat,
        new_user,
        chat_type: Some(chat.chat_type),
    })
}
