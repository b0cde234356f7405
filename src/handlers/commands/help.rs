//! Help command handler

use teloxide::{prelude::*, types::Message, utils::html};
use crate::handlers::commands::{reply_html, sender_language};
use crate::i18n::{I18n, TranslationParams};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message, services: &ServiceFactory, i18n: &I18n) -> Result<()> {
    let lang = sender_language(&msg, i18n);
    let mut params = TranslationParams::new();
    params.insert("bot_name".to_string(), html::escape(&services.profile.name));

    reply_html(&bot, &msg, i18n.t("commands.help.text", &lang, Some(&params))).await
}
