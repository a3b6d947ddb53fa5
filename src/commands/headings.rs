//! Heading line commands
//!
//! Insert a heading or subheading after the current section, toggle a line
//! in and out of being a heading, and demote/promote single heading lines.

use super::{CommandOutcome, Warning};
use crate::document::{Document, Position, Range, TextEdit};
use crate::outline::{
    find_enclosing_heading, match_heading_prefix, resolve_scope, HEADING_MARKER, MAX_DEPTH,
};
use crate::string_utils::char_len;

/// `depth` markers followed by a space.
fn heading_marker(depth: usize) -> String {
    let mut marker = HEADING_MARKER.to_string().repeat(depth.min(MAX_DEPTH));
    marker.push(' ');
    marker
}

/// Insert a new heading line below `line`, requesting the cursor at the end
/// of the line so the insertion carries it onto the new heading.
fn insert_heading_after<D>(document: &D, line: usize, depth: usize) -> CommandOutcome
where
    D: Document + ?Sized,
{
    let text = document.line(line);
    let end = Position::new(line, char_len(text));

    let mut inserted = if text.is_empty() {
        String::new()
    } else {
        "\n".to_string()
    };
    inserted.push_str(&heading_marker(depth));

    CommandOutcome::edits(vec![TextEdit::insert(end, inserted)]).with_cursor(end)
}

// ─────────────────────────────────────────────────────────────────────────────
// Insert
// ─────────────────────────────────────────────────────────────────────────────

/// Insert a heading of the current section's depth after the section, or a
/// top-level heading after the cursor line when there is no section.
pub fn insert_heading<D>(document: &D, cursor: Position) -> CommandOutcome
where
    D: Document + ?Sized,
{
    match resolve_scope(document, cursor) {
        Some(scope) => insert_heading_after(document, scope.end.line, scope.depth),
        None => insert_heading_after(document, cursor.line, 1),
    }
}

/// Insert a heading one level deeper than the current section, after it.
pub fn insert_subheading<D>(document: &D, cursor: Position) -> CommandOutcome
where
    D: Document + ?Sized,
{
    match resolve_scope(document, cursor) {
        Some(scope) => insert_heading_after(document, scope.end.line, scope.depth + 1),
        None => CommandOutcome::warning(Warning::NoSectionForSubheading),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Toggle
// ─────────────────────────────────────────────────────────────────────────────

/// Strip the heading marker from the primary cursor's line, or turn the line
/// into a heading at the depth of the enclosing section. Secondary cursors
/// are left where they are.
pub fn toggle_line_heading<D>(document: &D, cursors: &[Position]) -> CommandOutcome
where
    D: Document + ?Sized,
{
    let Some(&cursor) = cursors.first() else {
        return CommandOutcome::default();
    };
    let line = cursor.line;

    if let Some(marker) = match_heading_prefix(document.line(line)) {
        // Marker plus its single separator.
        let range = Range::on_line(line, 0, marker.len() + 1);
        let mut requested = cursors.to_vec();
        requested[0] = Position::new(line, 0);
        return CommandOutcome::edits(vec![TextEdit::delete(range)]).with_cursors(requested);
    }

    let depth = find_enclosing_heading(document, cursor)
        .map(|heading| heading.depth)
        .unwrap_or(1);
    CommandOutcome::edits(vec![TextEdit::insert(
        Position::new(line, 0),
        heading_marker(depth),
    )])
}

// ─────────────────────────────────────────────────────────────────────────────
// Demote / Promote
// ─────────────────────────────────────────────────────────────────────────────

/// Add one marker to every heading line under a cursor that is not yet at
/// the maximum depth.
pub fn demote_headings<D>(document: &D, lines: &[usize]) -> CommandOutcome
where
    D: Document + ?Sized,
{
    let edits: Vec<TextEdit> = lines
        .iter()
        .filter(|&&line| {
            match_heading_prefix(document.line(line)).is_some_and(|m| m.len() < MAX_DEPTH)
        })
        .map(|&line| TextEdit::insert(Position::new(line, 0), HEADING_MARKER.to_string()))
        .collect();

    if edits.is_empty() {
        return CommandOutcome::warning(Warning::NoLineToDemote);
    }
    CommandOutcome::edits(edits)
}

/// Remove one marker from every heading line under a cursor that is deeper
/// than the top level.
pub fn promote_headings<D>(document: &D, lines: &[usize]) -> CommandOutcome
where
    D: Document + ?Sized,
{
    let edits: Vec<TextEdit> = lines
        .iter()
        .filter(|&&line| match_heading_prefix(document.line(line)).is_some_and(|m| m.len() > 1))
        .map(|&line| TextEdit::delete(Range::on_line(line, 0, 1)))
        .collect();

    if edits.is_empty() {
        return CommandOutcome::warning(Warning::NoLineToPromote);
    }
    CommandOutcome::edits(edits)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
