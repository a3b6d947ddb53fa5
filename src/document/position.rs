//! Coordinates and edit operations exchanged with the host buffer.

use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Position / Range
// ─────────────────────────────────────────────────────────────────────────────

/// A zero-based (line, character) coordinate. `character` counts chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Line index
    pub line: usize,
    /// Character offset within the line
    pub character: usize,
}

impl Position {
    pub const fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// A half-open span `[start, end)` of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Span of `[start, end)` characters on a single line.
    pub const fn on_line(line: usize, start: usize, end: usize) -> Self {
        Self {
            start: Position::new(line, start),
            end: Position::new(line, end),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TextEdit
// ─────────────────────────────────────────────────────────────────────────────

/// One operation of an edit batch, in pre-batch coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Insert { position: Position, text: String },
    Delete { range: Range },
    Replace { range: Range, text: String },
}

impl TextEdit {
    pub fn insert(position: Position, text: impl Into<String>) -> Self {
        TextEdit::Insert {
            position,
            text: text.into(),
        }
    }

    pub fn delete(range: Range) -> Self {
        TextEdit::Delete { range }
    }

    pub fn replace(range: Range, text: impl Into<String>) -> Self {
        TextEdit::Replace {
            range,
            text: text.into(),
        }
    }

    /// The span of existing text this edit consumes (empty for inserts).
    pub fn range(&self) -> Range {
        match self {
            TextEdit::Insert { position, .. } => Range::new(*position, *position),
            TextEdit::Delete { range } | TextEdit::Replace { range, .. } => *range,
        }
    }

    /// The text this edit writes (empty for deletes).
    pub fn new_text(&self) -> &str {
        match self {
            TextEdit::Insert { text, .. } | TextEdit::Replace { text, .. } => text,
            TextEdit::Delete { .. } => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(2, 1) < Position::new(2, 3));
    }

    #[test]
    fn test_edit_accessors() {
        let insert = TextEdit::insert(Position::new(1, 0), "#");
        assert!(insert.range().is_empty());
        assert_eq!(insert.new_text(), "#");

        let delete = TextEdit::delete(Range::on_line(3, 0, 1));
        assert_eq!(delete.range().end, Position::new(3, 1));
        assert_eq!(delete.new_text(), "");
    }

    #[test]
    fn test_display() {
        assert_eq!(Range::on_line(2, 2, 6).to_string(), "2:2-2:6");
    }
}
