//! Outline model for Markdown documents
//!
//! This module provides the text-level model the editing commands are built
//! on. It works purely on line text and (line, column) coordinates:
//! - line prefix recognizers for headings, checkboxes and todo keywords
//! - the heading scope resolver
//! - todo keyword configuration and priorities
//!
//! # Example
//! ```ignore
//! use crate::document::Position;
//! use crate::outline::resolve_scope;
//!
//! let lines = ["# 1", "## 1.1", "# 2"];
//! let scope = resolve_scope(&lines[..], Position::new(0, 0)).unwrap();
//! assert_eq!(scope.end.line, 1);
//! ```

mod keywords;
mod prefix;
mod scope;

pub use keywords::{is_valid_keyword_entry, TodoKeywords, TodoPriority};
pub use prefix::{
    closes_scope, heading_depth, is_descendant_heading, marker_run, match_heading_prefix,
    start_of_text, CheckboxMatcher, CheckboxPrefix, KeywordMatcher, KeywordPrefix,
    EMPTY_CHECKBOX, HEADING_MARKER, MAX_DEPTH,
};
pub use scope::{find_enclosing_heading, resolve_scope, EnclosingHeading, Scope};

use crate::config::Settings;
use crate::error::Result;

/// Default checkbox "done" symbol.
pub const DEFAULT_CHECKBOX_SYMBOL: char = 'x';

/// Validated runtime view of the outline settings, with compiled matchers.
#[derive(Debug, Clone)]
pub struct OutlineConfig {
    keywords: TodoKeywords,
    keyword_matcher: KeywordMatcher,
    checkbox_matcher: CheckboxMatcher,
}

impl OutlineConfig {
    /// Build from a checkbox symbol and an already-parsed keyword list.
    pub fn new(checkbox_symbol: char, keywords: TodoKeywords) -> Result<Self> {
        Ok(Self {
            keyword_matcher: KeywordMatcher::new(&keywords.keywords())?,
            checkbox_matcher: CheckboxMatcher::new(checkbox_symbol)?,
            keywords,
        })
    }

    /// Derive from user settings. Invalid keyword entries are dropped and an
    /// invalid checkbox symbol falls back to the default.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.checkbox_symbol_char(),
            TodoKeywords::parse(&settings.todo_keywords),
        )
    }

    pub fn keywords(&self) -> &TodoKeywords {
        &self.keywords
    }

    pub fn keyword_matcher(&self) -> &KeywordMatcher {
        &self.keyword_matcher
    }

    pub fn checkbox_matcher(&self) -> &CheckboxMatcher {
        &self.checkbox_matcher
    }

    pub fn checkbox_symbol(&self) -> char {
        self.checkbox_matcher.done_symbol()
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default()).expect("default outline settings compile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OutlineConfig::default();
        assert_eq!(config.checkbox_symbol(), 'x');
        assert_eq!(config.keywords().keywords(), vec!["TODO", "DONE"]);
    }

    #[test]
    fn test_from_settings_drops_invalid() {
        let settings = Settings {
            checkbox_symbol: "ok".to_string(),
            todo_keywords: vec!["NEXT.high".into(), "later".into(), "DONE".into()],
            ..Settings::default()
        };
        let config = OutlineConfig::from_settings(&settings).unwrap();
        assert_eq!(config.checkbox_symbol(), DEFAULT_CHECKBOX_SYMBOL);
        assert_eq!(config.keywords().keywords(), vec!["NEXT", "DONE"]);
        assert!(config.keyword_matcher().find("# NEXT x").is_some());
    }
}
