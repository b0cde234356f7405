//! Message handlers module
//!
//! Registration of every incoming message's chat and sender, and the bot's own
//! membership changes reported through `my_chat_member`.

use teloxide::types::{ChatMemberUpdated, Message};
use tracing::{debug, warn};
use crate::database::ChatStore;
use crate::i18n::I18n;
use crate::models::NewChat;
use crate::services::{registry, MembershipChange, ServiceFactory};
use crate::utils::errors::Result;

/// Record the chat and sender of a message; runs before command routing
///
/// Store or logger failures are logged and swallowed so the update still
/// reaches its command handler.
pub async fn record_message(msg: &Message, services: &ServiceFactory, i18n: &I18n) {
    let registration = match registry::register_message(&services.store, msg).await {
        Ok(registration) => registration,
        Err(e) => {
            warn!(chat_id = msg.chat.id.0, error = %e, "Failed to record chat");
            return;
        }
    };

    if registration.is_new_private_chat() {
        if let Some(user) = msg.from.as_ref() {
            if let Err(e) = services.chat_logger.new_user(i18n, user).await {
                warn!(chat_id = msg.chat.id.0, error = %e, "Failed to post #NewUser to the logger chat");
            }
        }
    }
}

/// Handle the bot being added to or removed from a chat
pub async fn handle_my_chat_member(update: ChatMemberUpdated, services: &ServiceFactory, i18n: &I18n) -> Result<()> {
    if update.chat.is_private() {
        // users blocking or unblocking the bot
        return Ok(());
    }

    let change = MembershipChange::between(
        update.old_chat_member.status(),
        update.new_chat_member.status(),
    );
    let chat_id = update.chat.id.0;
    debug!(chat_id = chat_id, ?change, "Bot membership changed");

    match change {
        Some(MembershipChange::Joined) => {
            services.store.record_chat(&NewChat::from_chat(&update.chat)).await?;
            if let Err(e) = services.chat_logger
                .new_group(i18n, chat_id, update.chat.title(), &update.from)
                .await
            {
                warn!(chat_id = chat_id, error = %e, "Failed to post #NewGroup to the logger chat");
            }
        }
        Some(MembershipChange::Left) => {
            if let Err(e) = services.chat_logger
                .left_group(i18n, chat_id, update.chat.title(), &update.from)
                .await
            {
                warn!(chat_id = chat_id, error = %e, "Failed to post #LeftGroup to the logger chat");
            }
        }
        None => {}
    }

    Ok(())
}
