//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{HeraldError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_webhook_config(&settings.webhook)?;
    validate_database_config(&settings.database)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(HeraldError::Config(
            "Bot token is required".to_string()
        ));
    }

    if config.admin_ids.is_empty() {
        return Err(HeraldError::Config(
            "At least one admin ID must be configured".to_string()
        ));
    }

    if let Some(ref image_url) = config.start_image_url {
        url::Url::parse(image_url)?;
    }

    Ok(())
}

/// Validate webhook configuration
fn validate_webhook_config(config: &super::WebhookConfig) -> Result<()> {
    if let Some(ref webhook_url) = config.url {
        let parsed = url::Url::parse(webhook_url)?;
        if parsed.scheme() != "https" {
            return Err(HeraldError::Config(
                "Webhook URL must use https".to_string()
            ));
        }
    }

    if config.listen_addr.parse::<std::net::IpAddr>().is_err() {
        return Err(HeraldError::Config(
            format!("Invalid webhook listen address: {}", config.listen_addr)
        ));
    }

    if let Some(ref secret) = config.secret_token {
        let well_formed = (1..=256).contains(&secret.len())
            && secret.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !well_formed {
            return Err(HeraldError::Config(
                "Webhook secret token must be 1-256 characters of A-Z, a-z, 0-9, _ and -".to_string()
            ));
        }
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(HeraldError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(HeraldError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(HeraldError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    if config.acquire_timeout_secs == 0 {
        return Err(HeraldError::Config(
            "Database acquire timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_language.is_empty() {
        return Err(HeraldError::Config(
            "Default language is required".to_string()
        ));
    }

    if !config.supported_languages.contains(&config.default_language) {
        return Err(HeraldError::Config(
            "Default language must be in supported languages list".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(HeraldError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
