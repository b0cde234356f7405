//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /stats, etc.

pub mod start;
pub mod help;
pub mod stats;
pub mod broadcast;

use teloxide::{prelude::*, types::{Message, ParseMode}, utils::command::BotCommands};
use crate::utils::errors::Result;
use crate::services::ServiceFactory;
use crate::i18n::I18n;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Herald commands:")]
pub enum Command {
    #[command(description = "Start the bot and show the welcome message")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Show chat statistics (owner only)")]
    Stats,
    #[command(description = "Send the replied message to every chat (owner only)")]
    Broadcast,
}

/// Main command dispatcher
pub async fn handle_command(bot: Bot, msg: Message, cmd: Command, services: &ServiceFactory, i18n: &I18n) -> Result<()> {
    match cmd {
        Command::Start => start::handle_start(bot, msg, services, i18n).await,
        Command::Help => help::handle_help(bot, msg, services, i18n).await,
        Command::Stats => stats::handle_stats(bot, msg, services, i18n).await,
        Command::Broadcast => broadcast::handle_broadcast(bot, msg, services, i18n).await,
    }
}

/// Language of the message sender, falling back to the default
pub(crate) fn sender_language(msg: &Message, i18n: &I18n) -> String {
    i18n.detect_user_language(msg.from.as_ref().and_then(|user| user.language_code.as_deref()))
}

/// Send an HTML text to the chat the message came from
pub(crate) async fn reply_html(bot: &Bot, msg: &Message, text: String) -> Result<()> {
    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
