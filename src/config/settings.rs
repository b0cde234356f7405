//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::env;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{HeraldError, Result};

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub bot: BotConfig,
    pub webhook: WebhookConfig,
    pub database: DatabaseConfig,
    pub broadcast: BroadcastConfig,
    pub i18n: I18nConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
    pub token: String,
    /// Users allowed to run /stats and /broadcast
    pub admin_ids: Vec<i64>,
    /// Chat that receives #NewUser / #NewGroup lines
    pub logger_chat_id: Option<i64>,
    pub start_image_url: Option<String>,
}

/// Webhook listener configuration. Polling is used when `url` is unset.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub url: Option<String>,
    pub listen_addr: String,
    pub port: u16,
    pub secret_token: Option<String>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string, or `memory://` for the in-process store
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Close idle connections after this long; unset keeps them open
    pub idle_timeout_secs: Option<u64>,
    pub max_lifetime_secs: Option<u64>,
}

/// Broadcast pacing and policy
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BroadcastConfig {
    /// Edit the status message every N processed targets (0 disables)
    pub progress_every: u32,
    /// Pause every N processed targets (0 disables)
    pub pause_every: u32,
    pub pause_ms: u64,
    /// Skip groups where the bot is not an administrator
    pub require_group_admin: bool,
    pub max_flood_retries: u32,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct I18nConfig {
    pub default_language: String,
    pub supported_languages: Vec<String>,
    pub translations_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily rolling log files; console only when unset
    pub file_path: Option<String>,
    pub json: bool,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            listen_addr: "0.0.0.0".to_string(),
            port: 10000,
            secret_token: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/herald".to_string(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 30,
            idle_timeout_secs: Some(600),
            max_lifetime_secs: Some(1800),
        }
    }
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            progress_every: 25,
            pause_every: 20,
            pause_ms: 1000,
            require_group_admin: false,
            max_flood_retries: 2,
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            supported_languages: vec!["en".to_string(), "ru".to_string()],
            translations_dir: "translations".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            json: false,
        }
    }
}

/// Flat variables understood by older deployments, mapped onto settings keys
const LEGACY_ENV: &[(&str, &str)] = &[
    ("TOKEN", "bot.token"),
    ("LOGGER_GROUP", "bot.logger_chat_id"),
    ("START_IMAGE_URL", "bot.start_image_url"),
    ("MONGODB_URI", "database.url"),
    ("DATABASE_URL", "database.url"),
    ("WEBHOOK_URL", "webhook.url"),
    ("PORT", "webhook.port"),
    ("SECRET_TOKEN", "webhook.secret_token"),
];

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("HERALD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("bot.admin_ids"),
            );

        for (var, key) in LEGACY_ENV {
            if let Ok(value) = env::var(var) {
                if !value.trim().is_empty() {
                    builder = builder.set_override(*key, value)?;
                }
            }
        }

        if let Ok(raw) = env::var("ADMIN_ID") {
            let ids = parse_id_list(&raw)?;
            if !ids.is_empty() {
                builder = builder.set_override("bot.admin_ids", ids)?;
            }
        }

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_settings(self)
    }

    /// Whether the in-process store was requested instead of PostgreSQL
    pub fn uses_memory_store(&self) -> bool {
        self.database.url.starts_with("memory:")
    }
}

/// Parse a comma separated list of Telegram ids
pub fn parse_id_list(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| HeraldError::Config(format!("Invalid Telegram id: {}", part)))
        })
        .collect()
}
