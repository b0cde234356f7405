//! Stats command handler (owner only)

use teloxide::{prelude::*, types::Message};
use tracing::debug;
use crate::handlers::commands::{reply_html, sender_language};
use crate::i18n::I18n;
use crate::services::{stats, ServiceFactory};
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;

/// Handle /stats command
pub async fn handle_stats(bot: Bot, msg: Message, services: &ServiceFactory, i18n: &I18n) -> Result<()> {
    let lang = sender_language(&msg, i18n);

    if services.auth.check_message(&msg).is_err() {
        return reply_html(&bot, &msg, i18n.t("commands.stats.access_denied", &lang, None)).await;
    }

    let counts = stats::collect(&services.store).await?;
    debug!(?counts, "Collected chat statistics");

    if let Some(user) = msg.from.as_ref() {
        log_admin_action(user.id.0 as i64, "stats", None, None);
    }

    let text = stats::render(&counts, i18n, &lang, &services.profile.name);
    reply_html(&bot, &msg, text).await
}
