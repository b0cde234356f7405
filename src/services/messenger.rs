//! Telegram implementation of the broadcast [`Messenger`]

use teloxide::prelude::*;
use teloxide::types::{ChatMemberStatus, MessageId, ParseMode};
use tracing::warn;
use crate::services::broadcast::{BroadcastSource, DeliveryError, Messenger};
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
    bot_id: UserId,
}

impl TelegramMessenger {
    pub fn new(bot: Bot, bot_id: UserId) -> Self {
        Self { bot, bot_id }
    }
}

impl Messenger for TelegramMessenger {
    async fn deliver(&self, target: ChatId, source: &BroadcastSource) -> std::result::Result<(), DeliveryError> {
        let sent = if source.forward {
            self.bot
                .forward_message(target, source.from_chat, source.message_id)
                .await
                .map(|_| ())
        } else {
            self.bot
                .copy_message(target, source.from_chat, source.message_id)
                .await
                .map(|_| ())
        };

        sent.map_err(DeliveryError::from)
    }

    async fn is_admin_in(&self, chat: ChatId) -> bool {
        match self.bot.get_chat_member(chat, self.bot_id).await {
            Ok(member) => matches!(
                member.status(),
                ChatMemberStatus::Owner | ChatMemberStatus::Administrator
            ),
            Err(e) => {
                warn!(chat_id = chat.0, error = %e, "Failed to look up bot membership");
                false
            }
        }
    }

    async fn post_status(&self, chat: ChatId, text: String) -> Result<MessageId> {
        let message = self.bot
            .send_message(chat, text)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(message.id)
    }

    async fn edit_status(&self, chat: ChatId, message_id: MessageId, text: String) -> Result<()> {
        self.bot
            .edit_message_text(chat, message_id, text)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }
}
