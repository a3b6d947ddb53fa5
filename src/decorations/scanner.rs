//! Todo keyword scanner
//!
//! Scans the whole document text with one multi-line pattern and collects
//! the range of every keyword that directly follows a heading marker,
//! bucketed by the keyword's priority.

use super::PriorityBuckets;
use crate::document::{Position, Range};
use crate::outline::TodoKeywords;
use crate::string_utils::byte_to_char;
use log::debug;
use regex::Regex;

/// Compiled keyword scan for one keyword configuration.
#[derive(Debug, Clone)]
pub struct DecorationScanner {
    /// `None` when no keywords are configured
    regex: Option<Regex>,
    keywords: TodoKeywords,
}

impl DecorationScanner {
    pub fn new(keywords: &TodoKeywords) -> Result<Self, regex::Error> {
        let regex = if keywords.is_empty() {
            None
        } else {
            let alternation = keywords
                .keywords()
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"(?m)^(#+ )({})(\s|$)", alternation))?)
        };

        Ok(Self {
            regex,
            keywords: keywords.clone(),
        })
    }

    pub fn keywords(&self) -> &TodoKeywords {
        &self.keywords
    }

    /// Collect keyword ranges from `text`, in document order per bucket.
    pub fn scan(&self, text: &str) -> PriorityBuckets {
        let mut buckets = PriorityBuckets::default();
        let Some(regex) = &self.regex else {
            return buckets;
        };

        let lines = LineIndex::new(text);
        for caps in regex.captures_iter(text) {
            let Some(keyword) = caps.get(2) else {
                continue;
            };
            let priority = self.keywords.priority(keyword.as_str()).unwrap_or_default();
            let range = Range::new(lines.position(keyword.start()), lines.position(keyword.end()));
            buckets.push(priority, range);
        }

        debug!("Scanned {} keyword(s)", buckets.len());
        buckets
    }
}

/// Byte offsets of line starts, for converting match offsets to positions.
struct LineIndex<'a> {
    text: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(text: &'a str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, starts }
    }

    fn position(&self, byte: usize) -> Position {
        let line = self.starts.partition_point(|&start| start <= byte) - 1;
        let start = self.starts[line];
        Position::new(line, byte_to_char(&self.text[start..], byte - start))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::TodoPriority;

    fn scanner(keywords: &[&str]) -> DecorationScanner {
        DecorationScanner::new(&TodoKeywords::parse(keywords)).unwrap()
    }

    #[test]
    fn test_scan_collects_keyword_ranges() {
        let text = "# TODO first\nbody TODO\n## DONE second\n# TODO\n#TODO no";
        let buckets = scanner(&["TODO", "DONE"]).scan(text);

        assert_eq!(
            buckets.get(TodoPriority::Normal),
            &[
                Range::on_line(0, 2, 6),
                Range::on_line(2, 3, 7),
                Range::on_line(3, 2, 6),
            ]
        );
        assert!(buckets.get(TodoPriority::High).is_empty());
    }

    #[test]
    fn test_scan_buckets_by_priority() {
        let text = "# TODO a\n## WAIT b\n### DONE c\n# TODO d";
        let buckets = scanner(&["TODO.high", "WAIT.medium", "DONE.low"]).scan(text);

        assert_eq!(
            buckets.get(TodoPriority::High),
            &[Range::on_line(0, 2, 6), Range::on_line(3, 2, 6)]
        );
        assert_eq!(buckets.get(TodoPriority::Medium), &[Range::on_line(1, 3, 7)]);
        assert_eq!(buckets.get(TodoPriority::Low), &[Range::on_line(2, 4, 8)]);
        assert!(buckets.get(TodoPriority::Normal).is_empty());
    }

    #[test]
    fn test_scan_requires_word_boundary() {
        let buckets = scanner(&["TODO"]).scan("# TODOS\n#  TODO\n# TODO: x");
        assert_eq!(buckets.len(), 0);
    }

    #[test]
    fn test_scan_crlf_and_multibyte() {
        let text = "ä\r\n# TODO på\r\n";
        let buckets = scanner(&["TODO"]).scan(text);
        assert_eq!(buckets.get(TodoPriority::Normal), &[Range::on_line(1, 2, 6)]);
    }

    #[test]
    fn test_scan_without_keywords() {
        let buckets = scanner(&[]).scan("# TODO a");
        assert_eq!(buckets.len(), 0);
    }
}
