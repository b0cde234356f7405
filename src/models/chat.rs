//! Chat model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use thiserror::Error;

/// Kind of chat as stored; supergroups and channels count as groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    Group,
    Private,
}

#[derive(Debug, Error)]
#[error("Unknown chat type: {0}")]
pub struct UnknownChatType(pub String);

impl ChatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatType::Group => "group",
            ChatType::Private => "private",
        }
    }

    /// Classify a Telegram chat
    pub fn of(chat: &teloxide::types::Chat) -> Self {
        if chat.is_private() {
            ChatType::Private
        } else {
            ChatType::Group
        }
    }
}

impl fmt::Display for ChatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatType {
    type Err = UnknownChatType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "group" => Ok(ChatType::Group),
            "private" => Ok(ChatType::Private),
            other => Err(UnknownChatType(other.to_string())),
        }
    }
}

impl TryFrom<String> for ChatType {
    type Error = UnknownChatType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ChatRecord {
    pub chat_id: i64,
    pub title: Option<String>,
    #[sqlx(try_from = "String")]
    pub chat_type: ChatType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChat {
    pub chat_id: i64,
    pub title: Option<String>,
    pub chat_type: ChatType,
}

impl NewChat {
    pub fn from_chat(chat: &teloxide::types::Chat) -> Self {
        Self {
            chat_id: chat.id.0,
            title: chat.title().map(str::to_string),
            chat_type: ChatType::of(chat),
        }
    }
}
