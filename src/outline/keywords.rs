//! Todo keyword configuration
//!
//! Keywords are configured as an ordered list such as
//! `["TODO.high", "WAITING:", "DONE.low"]`. Each entry is validated against
//! `^[A-Z][A-Z_]*:?(\.(high|medium|low))?$`; the priority suffix is split off
//! and the bare keyword keeps its list position as its place in the cycle.

use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Priority
// ─────────────────────────────────────────────────────────────────────────────

/// Highlight priority of a todo keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoPriority {
    High,
    Medium,
    #[default]
    Normal,
    Low,
}

impl TodoPriority {
    /// All priorities in rendering order.
    pub fn all() -> &'static [TodoPriority] {
        &[
            TodoPriority::High,
            TodoPriority::Medium,
            TodoPriority::Normal,
            TodoPriority::Low,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TodoPriority::High => "high",
            TodoPriority::Medium => "medium",
            TodoPriority::Normal => "normal",
            TodoPriority::Low => "low",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "high" => Some(TodoPriority::High),
            "medium" => Some(TodoPriority::Medium),
            "low" => Some(TodoPriority::Low),
            _ => None,
        }
    }
}

impl fmt::Display for TodoPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Keyword List
// ─────────────────────────────────────────────────────────────────────────────

fn keyword_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Z][A-Z_]*:?)(?:\.(high|medium|low))?$")
            .expect("keyword validation pattern is valid")
    })
}

/// Whether a configured entry is a well-formed keyword.
pub fn is_valid_keyword_entry(entry: &str) -> bool {
    keyword_pattern().is_match(entry)
}

/// Ordered todo keywords with their priorities.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoKeywords {
    entries: Vec<(String, TodoPriority)>,
}

impl TodoKeywords {
    /// Parse configured entries, dropping invalid ones.
    ///
    /// A keyword listed twice keeps its first position and the priority of
    /// its last occurrence.
    pub fn parse<S: AsRef<str>>(configured: &[S]) -> Self {
        let mut entries: Vec<(String, TodoPriority)> = Vec::new();

        for entry in configured {
            let entry = entry.as_ref();
            let Some(caps) = keyword_pattern().captures(entry) else {
                warn!("Ignoring invalid todo keyword '{}'", entry);
                continue;
            };
            let keyword = &caps[1];
            let priority = caps
                .get(2)
                .and_then(|m| TodoPriority::from_suffix(m.as_str()))
                .unwrap_or_default();

            match entries.iter_mut().find(|(k, _)| k == keyword) {
                Some(existing) => existing.1 = priority,
                None => entries.push((keyword.to_string(), priority)),
            }
        }

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Bare keywords in cycle order.
    pub fn keywords(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|(k, _)| k.as_str())
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(k, _)| k.as_str())
    }

    pub fn position(&self, keyword: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == keyword)
    }

    pub fn priority(&self, keyword: &str) -> Option<TodoPriority> {
        self.entries
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, p)| *p)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
