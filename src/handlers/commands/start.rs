//! Start command handler

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile, Message, ParseMode},
    utils::html,
};
use tracing::{debug, warn};
use crate::handlers::callbacks::{START_CLOSE, START_SETTINGS};
use crate::handlers::commands::sender_language;
use crate::i18n::{I18n, TranslationParams};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Handle /start command
pub async fn handle_start(bot: Bot, msg: Message, services: &ServiceFactory, i18n: &I18n) -> Result<()> {
    debug!(chat_id = msg.chat.id.0, "Handling /start");

    let lang = sender_language(&msg, i18n);
    let caption = start_caption(i18n, &lang, &services.profile.name);
    let keyboard = start_keyboard(i18n, &lang);

    if let Some(image_url) = &services.settings.bot.start_image_url {
        let url = url::Url::parse(image_url)?;
        let sent = bot
            .send_photo(msg.chat.id, InputFile::url(url))
            .caption(caption.clone())
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard.clone())
            .await;

        match sent {
            Ok(_) => return Ok(()),
            Err(e) => warn!(error = %e, "Failed to send start image, falling back to text"),
        }
    }

    bot.send_message(msg.chat.id, caption)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

pub fn start_caption(i18n: &I18n, lang: &str, bot_name: &str) -> String {
    let mut params = TranslationParams::new();
    params.insert("bot_name".to_string(), html::escape(bot_name));
    i18n.t("commands.start.caption", lang, Some(&params))
}

pub fn start_keyboard(i18n: &I18n, lang: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback(i18n.t("buttons.settings", lang, None), START_SETTINGS),
        InlineKeyboardButton::callback(i18n.t("buttons.close", lang, None), START_CLOSE),
    ]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;
    use crate::config::I18nConfig;

    #[test]
    fn test_keyboard_layout() {
        let i18n = I18n::new(&I18nConfig::default()).unwrap();
        let keyboard = start_keyboard(&i18n, "en");

        assert_eq!(keyboard.inline_keyboard.len(), 1);
        let row = &keyboard.inline_keyboard[0];
        assert_eq!(row[0].text, "⚙️ Settings");
        assert_eq!(row[0].kind, InlineKeyboardButtonKind::CallbackData(START_SETTINGS.to_string()));
        assert_eq!(row[1].kind, InlineKeyboardButtonKind::CallbackData(START_CLOSE.to_string()));
    }

    #[test]
    fn test_caption_names_the_bot() {
        let i18n = I18n::new(&I18nConfig::default()).unwrap();
        assert!(start_caption(&i18n, "en", "Herald").contains("<b>Hii~ I'm Herald!</b>"));
    }
}
