//! Translation loader and i18n management
//!
//! This module provides the core internationalization functionality including
//! translation loading, language detection, and message formatting.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use serde_json::{Value, Map};
use tokio::fs;
use tracing::{info, warn, debug};
use crate::utils::errors::{HeraldError, Result};
use crate::config::I18nConfig;

/// Translations compiled into the binary; files on disk are merged over them
const BUILTIN_TRANSLATIONS: &[(&str, &str)] = &[
    ("en", include_str!("../../translations/en.json")),
    ("ru", include_str!("../../translations/ru.json")),
];

/// Main internationalization manager
#[derive(Debug, Clone)]
pub struct I18n {
    /// Loaded translations by language code
    translations: HashMap<String, Map<String, Value>>,
    /// Default language code
    default_language: String,
    /// Supported language codes
    supported_languages: Vec<String>,
    translations_dir: PathBuf,
}

/// Translation parameters for message formatting
pub type TranslationParams = HashMap<String, String>;

impl I18n {
    /// Create a new I18n instance holding the built-in translations
    pub fn new(config: &I18nConfig) -> Result<Self> {
        let mut translations = HashMap::new();
        for (lang_code, raw) in BUILTIN_TRANSLATIONS {
            match serde_json::from_str::<Value>(raw)? {
                Value::Object(map) => {
                    translations.insert(lang_code.to_string(), map);
                }
                _ => {
                    return Err(HeraldError::Config(
                        format!("Invalid built-in translation format for {}", lang_code)
                    ));
                }
            }
        }

        Ok(Self {
            translations,
            default_language: config.default_language.clone(),
            supported_languages: config.supported_languages.clone(),
            translations_dir: PathBuf::from(&config.translations_dir),
        })
    }

    /// Merge translation files from the translations directory over the built-ins
    pub async fn load_translations(&mut self) -> Result<()> {
        let translations_dir = self.translations_dir.clone();

        if !translations_dir.exists() {
            info!(dir = %translations_dir.display(), "Translations directory not found, using built-in texts");
            return Ok(());
        }

        let supported_languages = self.supported_languages.clone();
        for lang_code in &supported_languages {
            let file_path = translations_dir.join(format!("{}.json", lang_code));

            if file_path.exists() {
                self.load_language_file(&file_path, lang_code).await?;
                info!("Loaded translations for language: {}", lang_code);
            } else if !self.translations.contains_key(lang_code) {
                warn!("Translation file not found: {}", file_path.display());
            }
        }

        Ok(())
    }

    /// Load a single language file
    async fn load_language_file(&mut self, file_path: &Path, lang_code: &str) -> Result<()> {
        let content = fs::read_to_string(file_path).await?;
        let overrides = match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => map,
            _ => {
                return Err(HeraldError::Config(
                    format!("Invalid translation file format for {}", lang_code)
                ));
            }
        };

        let target = self.translations.entry(lang_code.to_string()).or_default();
        merge_maps(target, overrides);
        debug!("{} translation keys for {}", count_keys(target), lang_code);

        Ok(())
    }

    /// Get a translated message
    pub fn t(&self, key: &str, lang: &str, params: Option<&TranslationParams>) -> String {
        let effective_lang = self.get_effective_language(lang);

        let text = self.get_translation_text(key, &effective_lang)
            .or_else(|| self.get_translation_text(key, &self.default_language));

        match text {
            Some(text) => format_message(&text, params),
            None => {
                warn!("Translation key '{}' not found in any language", key);
                key.to_string()
            }
        }
    }

    /// Check if a language is supported
    pub fn is_language_supported(&self, lang: &str) -> bool {
        self.supported_languages.iter().any(|l| l == lang)
    }

    /// Get the effective language (fallback to default if not supported)
    fn get_effective_language(&self, lang: &str) -> String {
        if self.is_language_supported(lang) && self.translations.contains_key(lang) {
            lang.to_string()
        } else {
            self.default_language.clone()
        }
    }

    /// Get translation text from nested JSON structure
    fn get_translation_text(&self, key: &str, lang: &str) -> Option<String> {
        let mut current = self.translations.get(lang)?.get(key.split('.').next()?)?;

        // Support nested keys like "commands.start.caption"
        for k in key.split('.').skip(1) {
            current = current.get(k)?;
        }

        match current {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Get default language
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Detect user language from Telegram language code
    pub fn detect_user_language(&self, telegram_lang: Option<&str>) -> String {
        if let Some(lang) = telegram_lang {
            // Extract language code from locale (e.g., "en-US" -> "en")
            let lang_code = lang.split('-').next().unwrap_or(lang);

            if self.is_language_supported(lang_code) {
                return lang_code.to_string();
            }
        }

        self.default_language.clone()
    }
}

/// Fill `{name}` placeholders in one pass; substituted values are never
/// scanned again. Unknown placeholders are left as written.
fn format_message(template: &str, params: Option<&TranslationParams>) -> String {
    let Some(params) = params else {
        return template.to_string();
    };

    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match params.get(key) {
                    Some(value) => result.push_str(value),
                    None => {
                        result.push('{');
                        result.push_str(key);
                        result.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                result.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}

/// Deep-merge `overrides` into `target`
fn merge_maps(target: &mut Map<String, Value>, overrides: Map<String, Value>) {
    for (key, value) in overrides {
        match value {
            Value::Object(nested) => {
                if let Some(Value::Object(existing)) = target.get_mut(&key) {
                    merge_maps(existing, nested);
                    continue;
                }
                target.insert(key, Value::Object(nested));
            }
            value => {
                target.insert(key, value);
            }
        }
    }
}

/// Recursively count translation keys
fn count_keys(obj: &Map<String, Value>) -> usize {
    obj.values()
        .map(|value| match value {
            Value::Object(nested) => count_keys(nested),
            _ => 1,
        })
        .sum()
}
