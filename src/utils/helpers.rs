//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use teloxide::types::User;

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Chat titles as shown in logger lines: single line, bounded length
pub fn display_title(title: Option<&str>) -> String {
    match title {
        Some(title) if !title.trim().is_empty() => truncate_text(&normalize_whitespace(title), 64),
        _ => "Untitled".to_string(),
    }
}

/// Human readable name of a Telegram user, with the @username when present
pub fn display_user(user: &User) -> String {
    match &user.username {
        Some(username) => format!("{} (@{})", user.full_name(), username),
        None => user.full_name(),
    }
}
