//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Herald application.

use tracing::{info, warn, debug, error};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::services::broadcast::BroadcastReport;
use crate::utils::errors::{ErrorSeverity, HeraldError, Result};

/// Initialize logging based on configuration.
///
/// `RUST_LOG` takes precedence over the configured level. The returned guard
/// flushes the file writer and must be held until shutdown.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let console = if config.json {
        fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        fmt::layer().with_writer(std::io::stdout).boxed()
    };

    let (file_layer, guard) = match &config.file_path {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::daily(dir, "herald.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log admin actions
pub fn log_admin_action(admin_id: i64, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log a chat stored for the first time
pub fn log_chat_recorded(chat_id: i64, chat_type: &str, title: Option<&str>) {
    info!(
        chat_id = chat_id,
        chat_type = chat_type,
        title = title,
        "New chat recorded"
    );
}

/// Log the outcome of a broadcast run
pub fn log_broadcast_summary(admin_id: i64, report: &BroadcastReport) {
    info!(
        admin_id = admin_id,
        total = report.total,
        groups = report.groups,
        users = report.users,
        blocked = report.blocked,
        failed = report.failed,
        pruned = report.pruned,
        "Broadcast finished"
    );
}

/// Log a failed handler at the level its severity calls for
pub fn log_handler_error(context: &str, err: &HeraldError) {
    let recoverable = err.is_recoverable();
    match err.severity() {
        ErrorSeverity::Info => debug!(context = context, recoverable, error = %err, "Handler error"),
        ErrorSeverity::Warning => warn!(context = context, recoverable, error = %err, "Handler error"),
        ErrorSeverity::Error => error!(context = context, recoverable, error = %err, "Handler error"),
        ErrorSeverity::Critical => error!(context = context, recoverable, error = %err, critical = true, "Handler error"),
    }
}

/// Log a message delivered to the logger chat
pub fn log_logger_post(tag: &str, chat_id: i64) {
    debug!(tag = tag, chat_id = chat_id, "Logger chat notified");
}
