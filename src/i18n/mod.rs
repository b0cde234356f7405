//! Internationalization module
//!
//! All user-facing text lives in `translations/<lang>.json`. It provides
//! translation loading, language detection and message formatting.

pub mod loader;

// Re-export commonly used i18n components
pub use loader::{I18n, TranslationParams};
