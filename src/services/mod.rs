//! Services module
//!
//! Business logic shared by the handlers: chat registry, statistics,
//! broadcasting and the logger chat.

pub mod broadcast;
pub mod chat_logger;
pub mod messenger;
pub mod registry;
pub mod stats;

pub use broadcast::{
    BroadcastGuard, BroadcastPermit, BroadcastReport, BroadcastSource, Broadcaster, DeliveryError, Messenger,
};
pub use chat_logger::{ChatLogger, MembershipChange};
pub use messenger::TelegramMessenger;
pub use registry::Registration;

use teloxide::types::{Me, UserId};
use teloxide::Bot;
use crate::config::Settings;
use crate::database::{ChatStore, Store};
use crate::middleware::AuthMiddleware;

/// Identity of the running bot, fetched once with `getMe`
#[derive(Debug, Clone)]
pub struct BotProfile {
    pub id: UserId,
    pub username: String,
    pub name: String,
}

impl BotProfile {
    pub fn from_me(me: &Me) -> Self {
        Self {
            id: me.id,
            username: me.username().to_string(),
            name: me.first_name.clone(),
        }
    }
}

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub store: Store,
    pub messenger: TelegramMessenger,
    pub chat_logger: ChatLogger,
    pub auth: AuthMiddleware,
    pub broadcast_guard: BroadcastGuard,
    pub profile: BotProfile,
    pub settings: Settings,
}

impl ServiceFactory {
    pub fn new(bot: Bot, settings: Settings, store: Store, profile: BotProfile) -> Self {
        Self {
            messenger: TelegramMessenger::new(bot.clone(), profile.id),
            chat_logger: ChatLogger::new(bot, settings.bot.logger_chat_id),
            auth: AuthMiddleware::from_settings(&settings),
            broadcast_guard: BroadcastGuard::new(),
            store,
            profile,
            settings,
        }
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let store_healthy = self.store.health_check().await.is_ok();

        ServiceHealthStatus {
            store_healthy,
            store_backend: self.store.backend_name(),
            logger_enabled: self.chat_logger.is_enabled(),
            broadcast_running: self.broadcast_guard.is_running(),
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub store_healthy: bool,
    pub store_backend: &'static str,
    pub logger_enabled: bool,
    pub broadcast_running: bool,
}

impl ServiceHealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.store_healthy
    }

    /// Get list of problems worth logging at start-up
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.store_healthy {
            issues.push(format!("{} store is not reachable", self.store_backend));
        }
        if !self.logger_enabled {
            issues.push("Logger chat not configured; join and leave events are not reported".to_string());
        }

        issues
    }
}
