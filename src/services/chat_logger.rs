//! Logger chat notifications
//!
//! Tagged lines (`#NewUser`, `#NewGroup`, `#LeftGroup`) posted to the chat set
//! in `bot.logger_chat_id`. Without one every post is a no-op.

use teloxide::prelude::*;
use teloxide::types::{ChatMemberStatus, ParseMode, User};
use teloxide::utils::html;
use crate::i18n::{I18n, TranslationParams};
use crate::utils::errors::Result;
use crate::utils::helpers::{display_title, display_user};
use crate::utils::logging::log_logger_post;

/// How the bot's own membership in a chat changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipChange {
    Joined,
    Left,
}

impl MembershipChange {
    /// Compare the bot's status before and after a `my_chat_member` update
    pub fn between(old: ChatMemberStatus, new: ChatMemberStatus) -> Option<Self> {
        match (is_present(old), is_present(new)) {
            (false, true) => Some(MembershipChange::Joined),
            (true, false) => Some(MembershipChange::Left),
            _ => None,
        }
    }
}

fn is_present(status: ChatMemberStatus) -> bool {
    matches!(
        status,
        ChatMemberStatus::Owner
            | ChatMemberStatus::Administrator
            | ChatMemberStatus::Member
            | ChatMemberStatus::Restricted
    )
}

#[derive(Clone)]
pub struct ChatLogger {
    bot: Bot,
    chat_id: Option<ChatId>,
}

impl ChatLogger {
    pub fn new(bot: Bot, chat_id: Option<i64>) -> Self {
        Self {
            bot,
            chat_id: chat_id.map(ChatId),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.chat_id.is_some()
    }

    async fn post(&self, tag: &str, text: String) -> Result<()> {
        let Some(chat_id) = self.chat_id else {
            return Ok(());
        };

        self.bot
            .send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .await?;

        log_logger_post(tag, chat_id.0);
        Ok(())
    }

    pub async fn new_user(&self, i18n: &I18n, user: &User) -> Result<()> {
        self.post("#NewUser", render_new_user(i18n, user)).await
    }

    pub async fn new_group(&self, i18n: &I18n, chat_id: i64, title: Option<&str>, added_by: &User) -> Result<()> {
        self.post("#NewGroup", render_group(i18n, "logger.new_group", "added_by", chat_id, title, added_by))
            .await
    }

    pub async fn left_group(&self, i18n: &I18n, chat_id: i64, title: Option<&str>, removed_by: &User) -> Result<()> {
        self.post("#LeftGroup", render_group(i18n, "logger.left_group", "removed_by", chat_id, title, removed_by))
            .await
    }
}

pub fn render_new_user(i18n: &I18n, user: &User) -> String {
    let mut params = TranslationParams::new();
    params.insert("name".to_string(), html::escape(&display_user(user)));
    params.insert("id".to_string(), user.id.0.to_string());
    i18n.t("logger.new_user", i18n.default_language(), Some(&params))
}

fn render_group(i18n: &I18n, key: &str, actor_param: &str, chat_id: i64, title: Option<&str>, actor: &User) -> String {
    let mut params = TranslationParams::new();
    params.insert("title".to_string(), html::escape(&display_title(title)));
    params.insert("id".to_string(), chat_id.to_string());
    params.insert(actor_param.to_string(), html::escape(&display_user(actor)));
    i18n.t(key, i18n.default_language(), Some(&params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::UserId;
    use crate::config::I18nConfig;

    fn user(id: u64, first_name: &str, username: Option<&str>) -> User {
        User {
            id: UserId(id),
            is_bot: false,
            first_name: first_name.to_string(),
            last_name: None,
            username: username.map(str::to_string),
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        }
    }

    #[test]
    fn test_membership_change() {
        use ChatMemberStatus::*;

        assert_eq!(MembershipChange::between(Left, Member), Some(MembershipChange::Joined));
        assert_eq!(MembershipChange::between(Banned, Administrator), Some(MembershipChange::Joined));
        assert_eq!(MembershipChange::between(Member, Banned), Some(MembershipChange::Left));
        assert_eq!(MembershipChange::between(Administrator, Left), Some(MembershipChange::Left));
        assert_eq!(MembershipChange::between(Member, Administrator), None);
        assert_eq!(MembershipChange::between(Left, Banned), None);
    }

    #[test]
    fn test_render_new_user_escapes_name() {
        let i18n = I18n::new(&I18nConfig::default()).unwrap();
        let text = render_new_user(&i18n, &user(42, "<Eve>", Some("eve")));

        assert!(text.starts_with("#NewUser"));
        assert!(text.contains("&lt;Eve&gt; (@eve)"));
        assert!(text.contains("<code>42</code>"));
    }

    #[test]
    fn test_render_group_lines() {
        let i18n = I18n::new(&I18nConfig::default()).unwrap();
        let admin = user(7, "Alice", None);

        let joined = render_group(&i18n, "logger.new_group", "added_by", -100, Some("Rust & Friends"), &admin);
        assert!(joined.starts_with("#NewGroup"));
        assert!(joined.contains("Rust &amp; Friends"));
        assert!(joined.contains("<code>-100</code>"));
        assert!(joined.contains("Alice"));

        let left = render_group(&i18n, "logger.left_group", "removed_by", -100, None, &admin);
        assert!(left.starts_with("#LeftGroup"));
        assert!(left.contains("Untitled"));
    }

    #[test]
    fn test_group_title_placeholders_stay_literal() {
        let i18n = I18n::new(&I18nConfig::default()).unwrap();
        let admin = user(7, "Alice", None);

        let joined = render_group(&i18n, "logger.new_group", "added_by", -100, Some("{added_by} {id}"), &admin);
        assert!(joined.contains("<b>Title:</b> {added_by} {id}\n"));
        assert!(joined.ends_with("<b>Added by:</b> Alice"));
    }

    #[tokio::test]
    async fn test_disabled_logger_is_noop() {
        let i18n = I18n::new(&I18nConfig::default()).unwrap();
        let logger = ChatLogger::new(Bot::new("12345:test_token"), None);

        assert!(!logger.is_enabled());
        logger.new_user(&i18n, &user(1, "Bob", None)).await.unwrap();
    }
}
