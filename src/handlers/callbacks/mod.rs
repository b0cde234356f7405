//! Callback query handlers module
//!
//! Buttons attached to the /start greeting

use teloxide::{prelude::*, types::CallbackQuery};
use tracing::{debug, warn};
use crate::i18n::I18n;
use crate::utils::errors::Result;

pub const START_SETTINGS: &str = "start:settings";
pub const START_CLOSE: &str = "start:close";

/// What a callback button asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Settings,
    Close,
    Unknown,
}

impl CallbackAction {
    pub fn parse(data: Option<&str>) -> Self {
        match data {
            Some(START_SETTINGS) => CallbackAction::Settings,
            Some(START_CLOSE) => CallbackAction::Close,
            _ => CallbackAction::Unknown,
        }
    }
}

/// Main callback query dispatcher
pub async fn handle_callback_query(bot: Bot, query: CallbackQuery, i18n: &I18n) -> Result<()> {
    let user_id = query.from.id.0 as i64;
    let action = CallbackAction::parse(query.data.as_deref());
    debug!(user_id = user_id, callback_data = ?query.data, ?action, "Processing callback query");

    match action {
        CallbackAction::Settings => {
            let lang = i18n.detect_user_language(query.from.language_code.as_deref());
            bot.answer_callback_query(query.id.clone())
                .text(i18n.t("callbacks.settings", &lang, None))
                .show_alert(true)
                .await?;
        }
        CallbackAction::Close => {
            bot.answer_callback_query(query.id.clone()).await?;
            if let Some(message) = &query.message {
                if let Err(e) = bot.delete_message(message.chat().id, message.id()).await {
                    warn!(error = %e, user_id = user_id, "Failed to delete start message");
                }
            }
        }
        CallbackAction::Unknown => {
            warn!(user_id = user_id, callback_data = ?query.data, "Unknown callback data");
            bot.answer_callback_query(query.id.clone()).await?;
        }
    }

    Ok(())
}
