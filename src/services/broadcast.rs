//! Broadcast service
//!
//! Replays one message to every known chat, sequentially. Each target ends up
//! in exactly one of four counters (groups, users, blocked, failed). Every
//! failed send leaves a blocked record; targets that turned out unreachable are
//! also removed from the store.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use serde::Serialize;
use teloxide::types::{ChatId, Message, MessageId};
use teloxide::RequestError;
use tracing::{info, warn, debug};
use crate::config::BroadcastConfig;
use crate::database::ChatStore;
use crate::i18n::{I18n, TranslationParams};
use crate::models::{ChatRecord, ChatType, NewChat};
use crate::utils::errors::Result;

/// Error text fragments meaning the recipient blocked the bot
const BLOCKED_MARKERS: &[&str] = &["blocked", "deactivated"];

/// Error text fragments meaning the chat can no longer be reached at all
const UNREACHABLE_MARKERS: &[&str] = &[
    "chat not found",
    "kicked",
    "not a member",
    "group chat was deleted",
    "have no rights to send",
];

/// The message being broadcast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastSource {
    pub from_chat: ChatId,
    pub message_id: MessageId,
    /// Forward instead of copying, keeping the original attribution
    pub forward: bool,
}

impl BroadcastSource {
    /// Broadcast the message the command replied to. Forwards stay forwards.
    pub fn from_reply(reply: &Message) -> Self {
        Self {
            from_chat: reply.chat.id,
            message_id: reply.id,
            forward: reply.forward_origin().is_some(),
        }
    }
}

/// Why a single delivery failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The recipient blocked the bot or the account is gone
    Blocked(String),
    /// The chat does not exist for the bot anymore
    Unreachable(String),
    /// The group became a supergroup with a new id
    Migrated(ChatId),
    /// Telegram asked to slow down
    FloodWait(Duration),
    Failed(String),
}

impl DeliveryError {
    /// Classify a Telegram error by its text
    pub fn classify(err: &RequestError) -> Self {
        if let RequestError::RetryAfter(seconds) = err {
            return DeliveryError::FloodWait(seconds.duration());
        }
        if let RequestError::MigrateToChatId(new_id) = err {
            return DeliveryError::Migrated(*new_id);
        }

        let text = err.to_string();
        let lowered = text.to_lowercase();

        if BLOCKED_MARKERS.iter().any(|marker| lowered.contains(marker)) {
            DeliveryError::Blocked(text)
        } else if UNREACHABLE_MARKERS.iter().any(|marker| lowered.contains(marker)) {
            DeliveryError::Unreachable(text)
        } else {
            DeliveryError::Failed(text)
        }
    }

    pub fn reason(&self) -> String {
        match self {
            DeliveryError::Blocked(text)
            | DeliveryError::Unreachable(text)
            | DeliveryError::Failed(text) => text.clone(),
            DeliveryError::FloodWait(wait) => format!("flood wait of {}s", wait.as_secs()),
            DeliveryError::Migrated(new_id) => format!("group migrated to supergroup {}", new_id.0),
        }
    }
}

impl From<RequestError> for DeliveryError {
    fn from(err: RequestError) -> Self {
        DeliveryError::classify(&err)
    }
}

/// Outgoing side of a broadcast
pub trait Messenger: Send + Sync {
    /// Copy or forward the source message to `target`
    fn deliver(&self, target: ChatId, source: &BroadcastSource)
        -> impl Future<Output = std::result::Result<(), DeliveryError>> + Send;

    /// Whether the bot is an administrator or owner of `chat`
    fn is_admin_in(&self, chat: ChatId) -> impl Future<Output = bool> + Send;

    fn post_status(&self, chat: ChatId, text: String) -> impl Future<Output = Result<MessageId>> + Send;

    fn edit_status(&self, chat: ChatId, message_id: MessageId, text: String)
        -> impl Future<Output = Result<()>> + Send;
}

/// Counters of a broadcast run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BroadcastReport {
    pub total: u64,
    pub groups: u64,
    pub users: u64,
    pub blocked: u64,
    pub failed: u64,
    /// Targets removed from the store; already counted under `failed`
    pub pruned: u64,
}

impl BroadcastReport {
    /// Targets accounted for so far
    pub fn processed(&self) -> u64 {
        self.groups + self.users + self.blocked + self.failed
    }

    pub fn is_complete(&self) -> bool {
        self.processed() == self.total
    }

    fn params(&self) -> TranslationParams {
        let mut params = TranslationParams::new();
        params.insert("total".to_string(), self.total.to_string());
        params.insert("done".to_string(), self.processed().to_string());
        params.insert("groups".to_string(), self.groups.to_string());
        params.insert("users".to_string(), self.users.to_string());
        params.insert("blocked".to_string(), self.blocked.to_string());
        params.insert("failed".to_string(), self.failed.to_string());
        params.insert("pruned".to_string(), self.pruned.to_string());
        params
    }

    pub fn render_progress(&self, i18n: &I18n, lang: &str) -> String {
        i18n.t("commands.broadcast.progress", lang, Some(&self.params()))
    }

    pub fn render_final(&self, i18n: &I18n, lang: &str) -> String {
        i18n.t("commands.broadcast.report", lang, Some(&self.params()))
    }
}

/// Allows one broadcast at a time per process
#[derive(Clone, Default)]
pub struct BroadcastGuard {
    running: Arc<AtomicBool>,
}

/// Held for the duration of a broadcast; releases the guard on drop
pub struct BroadcastPermit {
    running: Arc<AtomicBool>,
}

impl BroadcastGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Option<BroadcastPermit> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BroadcastPermit { running: self.running.clone() })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Drop for BroadcastPermit {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

enum Outcome {
    Delivered,
    Blocked(String),
    Unreachable(String),
    Migrated(ChatId),
    /// Sent but rejected by Telegram
    Failed(String),
    /// Not attempted
    Skipped,
}

/// Runs one broadcast over everything in the store
pub struct Broadcaster<'a, S, M> {
    store: &'a S,
    messenger: &'a M,
    config: &'a BroadcastConfig,
    i18n: &'a I18n,
    lang: String,
}

impl<'a, S: ChatStore, M: Messenger> Broadcaster<'a, S, M> {
    pub fn new(store: &'a S, messenger: &'a M, config: &'a BroadcastConfig, i18n: &'a I18n, lang: &str) -> Self {
        Self {
            store,
            messenger,
            config,
            i18n,
            lang: lang.to_string(),
        }
    }

    /// Send `source` to every stored chat, reporting progress in `status_chat`
    pub async fn run(&self, source: &BroadcastSource, status_chat: ChatId) -> Result<BroadcastReport> {
        let targets = self.store.list_chats().await?;
        let mut report = BroadcastReport {
            total: targets.len() as u64,
            ..Default::default()
        };

        info!(total = report.total, forward = source.forward, "Broadcast started");

        let mut params = TranslationParams::new();
        params.insert("total".to_string(), report.total.to_string());
        let started = self.i18n.t("commands.broadcast.started", &self.lang, Some(&params));
        let status_message = match self.messenger.post_status(status_chat, started).await {
            Ok(message_id) => Some(message_id),
            Err(e) => {
                warn!(error = %e, "Failed to post broadcast status message");
                None
            }
        };

        for target in &targets {
            let outcome = self.process_target(target, source).await;
            self.apply_outcome(&mut report, target, outcome).await;

            let processed = report.processed();

            if let Some(message_id) = status_message {
                let every = u64::from(self.config.progress_every);
                if every > 0 && processed % every == 0 && processed < report.total {
                    let text = report.render_progress(self.i18n, &self.lang);
                    if let Err(e) = self.messenger.edit_status(status_chat, message_id, text).await {
                        debug!(error = %e, "Failed to update broadcast progress");
                    }
                }
            }

            let pause_every = u64::from(self.config.pause_every);
            if pause_every > 0 && processed % pause_every == 0 && processed < report.total {
                tokio::time::sleep(Duration::from_millis(self.config.pause_ms)).await;
            }
        }

        let final_text = report.render_final(self.i18n, &self.lang);
        let edited = match status_message {
            Some(message_id) => self.messenger.edit_status(status_chat, message_id, final_text.clone()).await,
            None => self.messenger.post_status(status_chat, final_text.clone()).await.map(|_| ()),
        };
        if let Err(e) = edited {
            warn!(error = %e, "Failed to publish broadcast report, retrying as a new message");
            if let Err(e) = self.messenger.post_status(status_chat, final_text).await {
                warn!(error = %e, "Failed to publish broadcast report");
            }
        }

        Ok(report)
    }

    async fn process_target(&self, target: &ChatRecord, source: &BroadcastSource) -> Outcome {
        let chat_id = ChatId(target.chat_id);

        if self.config.require_group_admin
            && target.chat_type == ChatType::Group
            && !self.messenger.is_admin_in(chat_id).await
        {
            debug!(chat_id = target.chat_id, "Skipping group where the bot is not an administrator");
            return Outcome::Skipped;
        }

        match self.deliver_with_retry(chat_id, source).await {
            Ok(()) => Outcome::Delivered,
            Err(DeliveryError::Blocked(reason)) => Outcome::Blocked(reason),
            Err(DeliveryError::Unreachable(reason)) => Outcome::Unreachable(reason),
            Err(DeliveryError::Migrated(new_id)) => Outcome::Migrated(new_id),
            Err(e) => {
                let reason = e.reason();
                warn!(chat_id = target.chat_id, reason = %reason, "Broadcast delivery failed");
                Outcome::Failed(reason)
            }
        }
    }

    async fn deliver_with_retry(&self, chat_id: ChatId, source: &BroadcastSource) -> std::result::Result<(), DeliveryError> {
        let mut retries = 0;
        loop {
            match self.messenger.deliver(chat_id, source).await {
                Err(DeliveryError::FloodWait(wait)) if retries < self.config.max_flood_retries => {
                    retries += 1;
                    warn!(chat_id = chat_id.0, wait_secs = wait.as_secs(), retry = retries, "Flood wait during broadcast");
                    tokio::time::sleep(wait).await;
                }
                other => return other,
            }
        }
    }

    async fn apply_outcome(&self, report: &mut BroadcastReport, target: &ChatRecord, outcome: Outcome) {
        match outcome {
            Outcome::Delivered => match target.chat_type {
                ChatType::Group => report.groups += 1,
                ChatType::Private => report.users += 1,
            },
            Outcome::Skipped => report.failed += 1,
            Outcome::Failed(reason) => {
                report.failed += 1;
                self.record_blocked(target.chat_id, &reason).await;
            }
            Outcome::Blocked(reason) => {
                report.blocked += 1;
                debug!(chat_id = target.chat_id, reason = %reason, "Broadcast target blocked the bot");
                self.record_blocked(target.chat_id, &reason).await;
            }
            Outcome::Unreachable(reason) => {
                report.failed += 1;
                debug!(chat_id = target.chat_id, reason = %reason, "Broadcast target unreachable, pruning");
                self.record_blocked(target.chat_id, &reason).await;
                self.prune(report, target.chat_id).await;
            }
            Outcome::Migrated(new_id) => {
                report.failed += 1;
                let reason = DeliveryError::Migrated(new_id).reason();
                info!(chat_id = target.chat_id, new_chat_id = new_id.0, "Group upgraded to a supergroup");
                self.record_blocked(target.chat_id, &reason).await;
                self.prune(report, target.chat_id).await;
                let successor = NewChat {
                    chat_id: new_id.0,
                    title: target.title.clone(),
                    chat_type: ChatType::Group,
                };
                if let Err(e) = self.store.record_chat(&successor).await {
                    warn!(chat_id = new_id.0, error = %e, "Failed to record migrated supergroup");
                }
            }
        }
    }

    async fn record_blocked(&self, chat_id: i64, reason: &str) {
        if let Err(e) = self.store.mark_blocked(chat_id, reason).await {
            warn!(chat_id = chat_id, error = %e, "Failed to record blocked chat");
        }
    }

    async fn prune(&self, report: &mut BroadcastReport, chat_id: i64) {
        match self.store.remove_chat(chat_id).await {
            Ok(true) => report.pruned += 1,
            Ok(false) => {}
            Err(e) => warn!(chat_id = chat_id, error = %e, "Failed to prune chat"),
        }
    }
}
