//! Error handling for Herald
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the Herald application
#[derive(Error, Debug)]
pub enum HeraldError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for Herald operations
pub type Result<T> = std::result::Result<T, HeraldError>;

impl HeraldError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            HeraldError::Database(_) => false,
            HeraldError::Migration(_) => false,
            HeraldError::Telegram(_) => true,
            HeraldError::ConfigLoad(_) => false,
            HeraldError::Config(_) => false,
            HeraldError::PermissionDenied(_) => false,
            HeraldError::InvalidInput(_) => false,
            HeraldError::Serialization(_) => false,
            HeraldError::Io(_) => true,
            HeraldError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HeraldError::Database(_) => ErrorSeverity::Critical,
            HeraldError::Migration(_) => ErrorSeverity::Critical,
            HeraldError::ConfigLoad(_) | HeraldError::Config(_) => ErrorSeverity::Critical,
            HeraldError::PermissionDenied(_) => ErrorSeverity::Warning,
            HeraldError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        assert_eq!(HeraldError::Config("x".into()).severity(), ErrorSeverity::Critical);
        assert_eq!(HeraldError::PermissionDenied("x".into()).severity(), ErrorSeverity::Warning);
        assert_eq!(HeraldError::InvalidInput("x".into()).severity(), ErrorSeverity::Info);
        assert_eq!(
            HeraldError::Io(std::io::Error::new(std::io::ErrorKind::Other, "x")).severity(),
            ErrorSeverity::Error
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(HeraldError::Io(std::io::Error::new(std::io::ErrorKind::Other, "x")).is_recoverable());
        assert!(!HeraldError::Config("bad".into()).is_recoverable());
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(ErrorSeverity::Critical.to_string(), "CRITICAL");
        assert_eq!(ErrorSeverity::Warning.to_string(), "WARN");
    }
}
