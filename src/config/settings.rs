//! User settings for mdorg
//!
//! This module defines the `Settings` struct that holds the user-configurable
//! options of the outline commands and the keyword highlighter, with serde
//! support for JSON persistence.

use crate::outline::{is_valid_keyword_entry, DEFAULT_CHECKBOX_SYMBOL};
use log::warn;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences.
///
/// This struct is serialized to JSON and persisted to the user's config directory.
/// All fields have defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Checkboxes
    // ─────────────────────────────────────────────────────────────────────────
    /// Symbol written into a checked checkbox (a single character)
    pub checkbox_symbol: String,

    // ─────────────────────────────────────────────────────────────────────────
    // Todo Keywords
    // ─────────────────────────────────────────────────────────────────────────
    /// Ordered keyword cycle, each entry optionally suffixed with
    /// `.high`, `.medium` or `.low`
    pub todo_keywords: Vec<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Highlighting
    // ─────────────────────────────────────────────────────────────────────────
    /// Delay between the last edit and a decoration rescan, in milliseconds
    pub decoration_debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            checkbox_symbol: DEFAULT_CHECKBOX_SYMBOL.to_string(),
            todo_keywords: vec!["TODO".to_string(), "DONE".to_string()],
            decoration_debounce_ms: Self::DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Default decoration debounce delay.
    pub const DEFAULT_DEBOUNCE_MS: u64 = 200;
    /// Maximum allowed decoration debounce delay.
    pub const MAX_DEBOUNCE_MS: u64 = 5000;

    /// The configured checkbox symbol, or the default when it is not exactly
    /// one non-whitespace character.
    pub fn checkbox_symbol_char(&self) -> char {
        let mut chars = self.checkbox_symbol.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => c,
            _ => DEFAULT_CHECKBOX_SYMBOL,
        }
    }

    /// Decoration debounce delay as a `Duration`.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.decoration_debounce_ms.min(Self::MAX_DEBOUNCE_MS))
    }

    /// Sanitize settings by replacing invalid values.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        let symbol = self.checkbox_symbol_char();
        if self.checkbox_symbol != symbol.to_string() {
            warn!(
                "Invalid checkbox symbol {:?}, using '{}'",
                self.checkbox_symbol, symbol
            );
            self.checkbox_symbol = symbol.to_string();
        }

        self.todo_keywords.retain(|entry| {
            let valid = is_valid_keyword_entry(entry);
            if !valid {
                warn!("Dropping invalid todo keyword '{}'", entry);
            }
            valid
        });

        self.decoration_debounce_ms = self.decoration_debounce_ms.min(Self::MAX_DEBOUNCE_MS);
    }

    /// Parse settings from JSON and sanitize them.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.checkbox_symbol, "x");
        assert_eq!(settings.todo_keywords, vec!["TODO", "DONE"]);
        assert_eq!(settings.decoration_debounce_ms, 200);
        assert_eq!(settings.debounce(), Duration::from_millis(200));
    }

    #[test]
    fn test_checkbox_symbol_char() {
        let mut settings = Settings::default();
        assert_eq!(settings.checkbox_symbol_char(), 'x');

        settings.checkbox_symbol = "✓".to_string();
        assert_eq!(settings.checkbox_symbol_char(), '✓');

        for invalid in ["", " ", "xx", "\t"] {
            settings.checkbox_symbol = invalid.to_string();
            assert_eq!(settings.checkbox_symbol_char(), 'x', "{:?}", invalid);
        }
    }

    #[test]
    fn test_sanitize() {
        let mut settings = Settings {
            checkbox_symbol: "done".to_string(),
            todo_keywords: vec!["TODO.high".into(), "wip".into(), "DONE".into()],
            decoration_debounce_ms: 60_000,
        };
        settings.sanitize();

        assert_eq!(settings.checkbox_symbol, "x");
        assert_eq!(settings.todo_keywords, vec!["TODO.high", "DONE"]);
        assert_eq!(settings.decoration_debounce_ms, Settings::MAX_DEBOUNCE_MS);
    }

    #[test]
    fn test_empty_keyword_list_is_kept() {
        let settings = Settings::from_json_sanitized(r#"{"todo_keywords": []}"#).unwrap();
        assert!(settings.todo_keywords.is_empty());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let settings = Settings {
            checkbox_symbol: "✓".to_string(),
            todo_keywords: vec!["NEXT".into(), "WAITING:.low".into()],
            decoration_debounce_ms: 50,
        };

        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, back);
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let settings: Settings = serde_json::from_str(r#"{"checkbox_symbol": "+"}"#).unwrap();

        assert_eq!(settings.checkbox_symbol, "+");
        assert_eq!(settings.todo_keywords, vec!["TODO", "DONE"]);
        assert_eq!(settings.decoration_debounce_ms, 200);
    }

    #[test]
    fn test_from_json_sanitized_rejects_bad_json() {
        assert!(Settings::from_json_sanitized("{ not json").is_err());
    }
}
