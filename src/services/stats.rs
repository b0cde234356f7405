//! Chat statistics for /stats

use crate::database::ChatStore;
use crate::i18n::{I18n, TranslationParams};
use crate::models::{ChatStats, ChatType};
use crate::utils::errors::Result;

/// Count groups, private chats, users and blocked chats
pub async fn collect<S: ChatStore>(store: &S) -> Result<ChatStats> {
    Ok(ChatStats {
        groups: store.count_chats(ChatType::Group).await?,
        private_chats: store.count_chats(ChatType::Private).await?,
        users: store.count_users().await?,
        blocked: store.count_blocked().await?,
    })
}

pub fn render(stats: &ChatStats, i18n: &I18n, lang: &str, bot_name: &str) -> String {
    let mut params = TranslationParams::new();
    params.insert("bot_name".to_string(), teloxide::utils::html::escape(bot_name));
    params.insert("blocked".to_string(), stats.blocked.to_string());
    params.insert("groups".to_string(), stats.groups.to_string());
    params.insert("private_chats".to_string(), stats.private_chats.to_string());
    params.insert("users".to_string(), stats.users.to_string());
    i18n.t("commands.stats.report", lang, Some(&params))
}
