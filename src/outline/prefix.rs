//! Line prefix primitives
//!
//! Pure, anchored-at-column-0 recognizers for the three kinds of line prefix
//! the outline cares about: heading markers, checkboxes and todo keywords.
//! Every recognizer returns `None` for "not found"; nothing here can fail.
//! Ranges are character columns within the line.

use crate::string_utils::byte_to_char;
use regex::Regex;
use std::ops::Range;

/// Character that introduces a heading.
pub const HEADING_MARKER: char = '#';

/// Deepest heading level; longer marker runs are capped to this depth.
pub const MAX_DEPTH: usize = 6;

/// Text inserted by "toggle line/checkbox".
pub const EMPTY_CHECKBOX: &str = "- [ ] ";

// ─────────────────────────────────────────────────────────────────────────────
// Heading Prefix
// ─────────────────────────────────────────────────────────────────────────────

/// Length of the run of heading markers at the start of `line`.
pub fn marker_run(line: &str) -> usize {
    line.chars().take_while(|&c| c == HEADING_MARKER).count()
}

/// Return the bare marker (e.g. `"##"`) if `line` starts a heading.
///
/// A heading is one or more markers followed by a space or tab. A marker-only
/// line (`"#"`, `"##"`) and a line with leading whitespace are not headings.
pub fn match_heading_prefix(line: &str) -> Option<&str> {
    let run = marker_run(line);
    if run == 0 {
        return None;
    }
    // Markers are ASCII, so the run length is also a byte offset.
    match line[run..].chars().next() {
        Some(' ') | Some('\t') => Some(&line[..run]),
        _ => None,
    }
}

/// Depth of a heading marker, capped at [`MAX_DEPTH`].
pub fn heading_depth(marker: &str) -> usize {
    marker.chars().count().min(MAX_DEPTH)
}

/// Whether `line` is a heading of depth `1..=depth`, i.e. one that closes a
/// scope of the given depth. Unlike [`match_heading_prefix`], a marker-only
/// line counts.
pub fn closes_scope(line: &str, depth: usize) -> bool {
    let run = marker_run(line);
    (1..=depth).contains(&run) && followed_by_space_or_end(line, run, true)
}

/// Whether `line` is a heading strictly deeper than `depth`, i.e. a
/// descendant of a scope of that depth. Requires a whitespace separator.
pub fn is_descendant_heading(line: &str, depth: usize) -> bool {
    let run = marker_run(line);
    run > depth && followed_by_space_or_end(line, run, false)
}

fn followed_by_space_or_end(line: &str, run: usize, allow_end: bool) -> bool {
    match line[run..].chars().next() {
        Some(c) => c.is_whitespace(),
        None => allow_end,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Checkbox Prefix
// ─────────────────────────────────────────────────────────────────────────────

/// A recognized `- [ ]` / `- [x]` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxPrefix {
    /// The box token with its trailing padding, e.g. `"- [x] "`
    pub box_text: String,
    /// Columns of `box_text`; starts after any indentation
    pub box_range: Range<usize>,
    /// The character between the brackets (space when unchecked)
    pub symbol: char,
    /// Column of `symbol`
    pub symbol_range: Range<usize>,
}

impl CheckboxPrefix {
    pub fn is_checked(&self) -> bool {
        self.symbol != ' '
    }
}

/// Recognizes checkbox prefixes for one configured "done" symbol.
#[derive(Debug, Clone)]
pub struct CheckboxMatcher {
    regex: Regex,
    done_symbol: char,
}

impl CheckboxMatcher {
    /// Build a matcher for `^([ \t]*)(- \[)( |<done>)\][ \t]+`.
    pub fn new(done_symbol: char) -> Result<Self, regex::Error> {
        let pattern = format!(
            r"^([ \t]*)(- \[)( |{})\][ \t]+",
            regex::escape(&done_symbol.to_string())
        );
        Ok(Self {
            regex: Regex::new(&pattern)?,
            done_symbol,
        })
    }

    pub fn done_symbol(&self) -> char {
        self.done_symbol
    }

    /// Match a checkbox at the start of `line` (after indentation).
    pub fn find(&self, line: &str) -> Option<CheckboxPrefix> {
        let caps = self.regex.captures(line)?;
        let whole = caps.get(0)?;
        let indent = caps.get(1)?;
        let symbol = caps.get(3)?;

        let box_start = byte_to_char(line, indent.end());
        let symbol_start = byte_to_char(line, symbol.start());
        Some(CheckboxPrefix {
            box_text: line[indent.end()..whole.end()].to_string(),
            box_range: box_start..byte_to_char(line, whole.end()),
            symbol: symbol.as_str().chars().next()?,
            symbol_range: symbol_start..symbol_start + 1,
        })
    }
}

/// Column of the first non-indentation character of `line`.
pub fn start_of_text(line: &str) -> usize {
    line.chars().take_while(|&c| c == ' ' || c == '\t').count()
}

// ─────────────────────────────────────────────────────────────────────────────
// Keyword Prefix
// ─────────────────────────────────────────────────────────────────────────────

/// The todo keyword slot of a heading-like line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordPrefix {
    /// Length of the marker run
    pub marker_len: usize,
    /// The keyword found directly after the marker, if any
    pub keyword: Option<String>,
    /// Columns of the keyword alone (empty at `marker_len` when absent)
    pub keyword_range: Range<usize>,
    /// Columns of the keyword with its single leading space
    pub keyword_with_padding_range: Range<usize>,
}

/// Recognizes `^(#+)( (KW1|KW2|…))?(\s|$)` for a configured keyword list.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    regex: Regex,
    has_keywords: bool,
}

impl KeywordMatcher {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, regex::Error> {
        let pattern = if keywords.is_empty() {
            r"^(#+)(\s|$)".to_string()
        } else {
            let alternation = keywords
                .iter()
                .map(|k| regex::escape(k.as_ref()))
                .collect::<Vec<_>>()
                .join("|");
            format!(r"^(#+)(?: ({}))?(\s|$)", alternation)
        };
        Ok(Self {
            regex: Regex::new(&pattern)?,
            has_keywords: !keywords.is_empty(),
        })
    }

    /// Match the keyword slot at the start of `line`.
    pub fn find(&self, line: &str) -> Option<KeywordPrefix> {
        let caps = self.regex.captures(line)?;
        // Marker and keywords are ASCII: byte offsets equal columns here.
        let marker_len = caps.get(1)?.end();
        let keyword = if self.has_keywords { caps.get(2) } else { None };

        let (keyword, keyword_range, keyword_with_padding_range) = match keyword {
            Some(m) => (
                Some(m.as_str().to_string()),
                m.start()..m.end(),
                marker_len..m.end(),
            ),
            None => (None, marker_len..marker_len, marker_len..marker_len),
        };

        Some(KeywordPrefix {
            marker_len,
            keyword,
            keyword_range,
            keyword_with_padding_range,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
