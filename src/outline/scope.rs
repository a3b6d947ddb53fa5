//! Heading scope resolution
//!
//! A scope is a heading line plus everything that belongs to it: body text
//! and deeper headings, up to (not including) the next heading of equal or
//! shallower depth. Trailing blank lines are left outside the scope so that
//! anything inserted after it lands directly below the last content line.
//!
//! Scopes are never cached. Every command resolves a fresh one from the
//! current text because the buffer changes between commands.
//!
//! ```text
//! # 1          <- cursor here: lines 0..=2, depth 1
//! ## 1.1
//! ### 1.1.1    <- cursor here: lines 2..=2, depth 3
//! # 2
//! ```

use super::prefix::{closes_scope, heading_depth, match_heading_prefix};
use crate::document::{Document, Position};
use crate::string_utils::char_len;

/// The heading line that owns a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnclosingHeading {
    /// Capped depth of the heading
    pub depth: usize,
    /// Uncapped length of the marker run
    pub marker_len: usize,
    /// Line index of the heading
    pub start_line: usize,
}

/// A resolved heading scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    /// Start of the heading line
    pub start: Position,
    /// End of the last non-blank line belonging to the scope
    pub end: Position,
    /// Depth of the heading that opens the scope
    pub depth: usize,
}

impl Scope {
    /// Line indices covered by the scope.
    pub fn lines(&self) -> std::ops::RangeInclusive<usize> {
        self.start.line..=self.end.line
    }

    /// Lines after the heading line, up to and including the end line.
    pub fn body_lines(&self) -> std::ops::RangeInclusive<usize> {
        self.start.line + 1..=self.end.line
    }
}

/// Find the heading on `position.line` or the nearest one above it.
pub fn find_enclosing_heading<D>(document: &D, position: Position) -> Option<EnclosingHeading>
where
    D: Document + ?Sized,
{
    if document.line_count() == 0 {
        return None;
    }
    let from = position.line.min(document.line_count() - 1);

    (0..=from).rev().find_map(|line| {
        match_heading_prefix(document.line(line)).map(|marker| EnclosingHeading {
            depth: heading_depth(marker),
            marker_len: marker.len(),
            start_line: line,
        })
    })
}

/// Resolve the scope enclosing `position`, or `None` when no heading is at
/// or above it.
pub fn resolve_scope<D>(document: &D, position: Position) -> Option<Scope>
where
    D: Document + ?Sized,
{
    let heading = find_enclosing_heading(document, position)?;
    let depth = heading.depth;

    let mut last_non_empty = heading.start_line;
    for line in heading.start_line + 1..document.line_count() {
        let text = document.line(line);
        if closes_scope(text, depth) {
            break;
        }
        if !text.is_empty() {
            last_non_empty = line;
        }
    }

    Some(Scope {
        start: Position::new(heading.start_line, 0),
        end: Position::new(last_non_empty, char_len(document.line(last_non_empty))),
        depth,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
