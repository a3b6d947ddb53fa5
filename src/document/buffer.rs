//! In-memory host buffer
//!
//! `TextBuffer` plays the part of the host editor: it owns the lines and the
//! cursors, and applies an edit batch atomically. Every edit in a batch is
//! expressed against the text as it stood before the batch, so earlier
//! insertions never shift the coordinates of later ones.
//!
//! Cursor mapping follows the usual editor rules: a cursor at or after an
//! insertion point is pushed forward, a cursor inside a deleted or replaced
//! span collapses into what replaced it, and a cursor after a span moves by
//! the span's length delta.

use super::{Document, Position, TextEdit};
use crate::string_utils::{char_len, char_to_byte};
use log::{debug, warn};
use std::borrow::Cow;

/// One batch operation resolved to absolute character offsets.
struct Span<'a> {
    start: usize,
    end: usize,
    text: Cow<'a, str>,
}

impl Span<'_> {
    fn inserted_len(&self) -> usize {
        char_len(&self.text)
    }
}

/// Split text into lines and the terminator that followed each one. The
/// last line's terminator is empty unless the text ends in a lone `\r`.
fn split_lines(text: &str) -> (Vec<String>, Vec<&'static str>) {
    let mut lines = Vec::new();
    let mut endings = Vec::new();
    let mut open_last_line = true;

    for piece in text.split_inclusive('\n') {
        let (line, ending) = if let Some(line) = piece.strip_suffix("\r\n") {
            (line, "\r\n")
        } else if let Some(line) = piece.strip_suffix('\n') {
            (line, "\n")
        } else if let Some(line) = piece.strip_suffix('\r') {
            (line, "\r")
        } else {
            (piece, "")
        };
        open_last_line = ending.ends_with('\n');
        lines.push(line.to_string());
        endings.push(ending);
    }

    if open_last_line {
        lines.push(String::new());
        endings.push("");
    }
    (lines, endings)
}

/// An editable document with one or more cursors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    /// Terminator after each line, kept so untouched lines save unchanged
    endings: Vec<&'static str>,
    cursors: Vec<Position>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextBuffer {
    /// Create a buffer from full text. Each line's own terminator (`\n`,
    /// `\r\n` or a trailing lone `\r`) is restored by [`TextBuffer::to_text`].
    pub fn new(text: &str) -> Self {
        let (lines, endings) = split_lines(text);
        Self {
            lines,
            endings,
            cursors: vec![Position::default()],
        }
    }

    /// Full text with every line's original terminator.
    pub fn to_text(&self) -> String {
        self.lines
            .iter()
            .zip(&self.endings)
            .map(|(line, ending)| format!("{}{}", line, ending))
            .collect()
    }

    /// Newline used for line breaks inserted on `line`.
    fn newline_at(&self, line: usize) -> &'static str {
        let line = line.min(self.lines.len().saturating_sub(1));
        match self.endings[line] {
            "\r\n" => "\r\n",
            "\n" => "\n",
            // Last line: follow the line above
            _ if line > 0 && self.endings[line - 1] == "\r\n" => "\r\n",
            _ => "\n",
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cursors
    // ─────────────────────────────────────────────────────────────────────────

    /// Current cursors, primary first.
    pub fn cursors(&self) -> &[Position] {
        &self.cursors
    }

    /// Replace all cursors. Positions are clamped to the document.
    pub fn set_cursors(&mut self, cursors: Vec<Position>) {
        self.cursors = cursors.into_iter().map(|pos| self.clamp(pos)).collect();
    }

    pub fn set_cursor(&mut self, position: Position) {
        self.set_cursors(vec![position]);
    }

    /// Clamp a position to the nearest valid one.
    pub fn clamp(&self, position: Position) -> Position {
        let line = position.line.min(self.lines.len().saturating_sub(1));
        let len = char_len(self.line(line));
        Position::new(line, position.character.min(len))
    }

    /// Whether `position` addresses an existing line and column.
    pub fn contains(&self, position: Position) -> bool {
        self.lines
            .get(position.line)
            .is_some_and(|line| position.character <= char_len(line))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Offsets
    // ─────────────────────────────────────────────────────────────────────────

    fn offset_at(&self, position: Position) -> usize {
        let position = self.clamp(position);
        let before: usize = self.lines[..position.line]
            .iter()
            .zip(&self.endings)
            .map(|(line, ending)| char_len(line) + ending.len())
            .sum();
        before + position.character
    }

    fn position_at(&self, offset: usize) -> Position {
        let mut remaining = offset;
        for (index, line) in self.lines.iter().enumerate() {
            let len = char_len(line);
            if remaining <= len {
                return Position::new(index, remaining);
            }
            let step = len + self.endings[index].len();
            if remaining < step {
                return Position::new(index, len);
            }
            remaining -= step;
        }
        let last = self.lines.len().saturating_sub(1);
        Position::new(last, char_len(self.line(last)))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Batch Editing
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a batch of edits atomically and remap the cursors.
    ///
    /// Edits are ordered by start position; edits sharing a start keep their
    /// batch order. An edit overlapping an earlier one loses the overlap.
    pub fn apply_edits(&mut self, edits: &[TextEdit]) {
        if edits.is_empty() {
            return;
        }

        let mut spans: Vec<Span<'_>> = edits
            .iter()
            .map(|edit| {
                let range = edit.range();
                let start = self.offset_at(range.start);
                let end = self.offset_at(range.end).max(start);
                let inserted = edit.new_text();
                let crlf = self.newline_at(range.start.line) == "\r\n";
                let text = if crlf && inserted.contains('\n') && !inserted.contains('\r') {
                    Cow::Owned(inserted.replace('\n', "\r\n"))
                } else {
                    Cow::Borrowed(inserted)
                };
                Span { start, end, text }
            })
            .collect();
        spans.sort_by_key(|span| span.start);

        let text = self.to_text();
        let mut result = String::with_capacity(text.len());
        let mut consumed = 0;
        for span in &mut spans {
            if span.start < consumed {
                warn!(
                    "Overlapping edit at offset {} clamped to {}",
                    span.start, consumed
                );
                span.start = consumed;
                span.end = span.end.max(consumed);
            }
            result.push_str(&text[char_to_byte(&text, consumed)..char_to_byte(&text, span.start)]);
            result.push_str(&span.text);
            consumed = span.end;
        }
        result.push_str(&text[char_to_byte(&text, consumed)..]);

        let offsets: Vec<usize> = self
            .cursors
            .iter()
            .map(|&cursor| map_offset(self.offset_at(cursor), &spans))
            .collect();

        let (lines, endings) = split_lines(&result);
        self.lines = lines;
        self.endings = endings;
        self.cursors = offsets
            .into_iter()
            .map(|offset| self.position_at(offset))
            .collect();

        debug!(
            "Applied {} edit(s), document now has {} line(s)",
            edits.len(),
            self.lines.len()
        );
    }
}

/// Map a pre-batch offset to its post-batch offset.
fn map_offset(offset: usize, spans: &[Span<'_>]) -> usize {
    let mut shifted = offset;
    for span in spans {
        let inserted = span.inserted_len();
        if span.start == span.end {
            if offset >= span.start {
                shifted += inserted;
            }
        } else if offset >= span.end {
            shifted = shifted + inserted - (span.end - span.start);
        } else if offset > span.start {
            // Inside a deleted/replaced span; later spans start after it.
            let base = shifted - (offset - span.start);
            return base + (offset - span.start).min(inserted);
        }
    }
    shifted
}

impl Document for TextBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
