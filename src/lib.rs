//! Herald Telegram Bot
//!
//! Greets users, keeps track of every chat it has seen, reports counts to its
//! owners and broadcasts an owner's message to all known chats.

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod i18n;
pub mod utils;
pub mod middleware;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{HeraldError, Result};

// Re-export main components for easy access
pub use database::{ChatStore, DatabaseService, MemoryStore, Store};
pub use services::{BroadcastReport, Broadcaster, ServiceFactory};
pub use i18n::I18n;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
