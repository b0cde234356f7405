//! Broadcast command handler (owner only, must reply to the message to send)

use teloxide::{prelude::*, types::Message};
use tracing::info;
use crate::handlers::commands::{reply_html, sender_language};
use crate::i18n::I18n;
use crate::services::{BroadcastSource, Broadcaster, ServiceFactory};
use crate::utils::errors::Result;
use crate::utils::logging::{log_admin_action, log_broadcast_summary};

/// Handle /broadcast command
pub async fn handle_broadcast(bot: Bot, msg: Message, services: &ServiceFactory, i18n: &I18n) -> Result<()> {
    let lang = sender_language(&msg, i18n);

    let admin_id = match msg.from.as_ref() {
        Some(user) if services.auth.check_admin_auth(user).is_ok() => user.id.0 as i64,
        _ => {
            return reply_html(&bot, &msg, i18n.t("commands.broadcast.access_denied", &lang, None)).await;
        }
    };

    let Some(reply) = msg.reply_to_message() else {
        return reply_html(&bot, &msg, i18n.t("commands.broadcast.reply_required", &lang, None)).await;
    };

    let Some(_permit) = services.broadcast_guard.try_acquire() else {
        return reply_html(&bot, &msg, i18n.t("commands.broadcast.already_running", &lang, None)).await;
    };

    let source = BroadcastSource::from_reply(reply);
    log_admin_action(
        admin_id,
        "broadcast",
        Some(&reply.id.0.to_string()),
        Some(if source.forward { "forward" } else { "copy" }),
    );
    info!(admin_id = admin_id, message_id = reply.id.0, "Starting broadcast");

    let broadcaster = Broadcaster::new(
        &services.store,
        &services.messenger,
        &services.settings.broadcast,
        i18n,
        &lang,
    );
    let report = broadcaster.run(&source, msg.chat.id).await?;

    log_broadcast_summary(admin_id, &report);
    Ok(())
}
