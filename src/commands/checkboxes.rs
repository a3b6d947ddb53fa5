//! Checkbox toggling
//!
//! A line with a checkbox loses the box (and its padding); any other line
//! gets an empty box after its indentation. The two edits are exact inverses.

use super::CommandOutcome;
use crate::document::{Document, Position, Range, TextEdit};
use crate::outline::{start_of_text, OutlineConfig, EMPTY_CHECKBOX};

/// Toggle the checkbox on every cursor line.
pub fn toggle_checkboxes<D>(document: &D, lines: &[usize], config: &OutlineConfig) -> CommandOutcome
where
    D: Document + ?Sized,
{
    let edits = lines
        .iter()
        .map(|&line| {
            let text = document.line(line);
            match config.checkbox_matcher().find(text) {
                Some(prefix) => TextEdit::delete(Range::on_line(
                    line,
                    prefix.box_range.start,
                    prefix.box_range.end,
                )),
                None => TextEdit::insert(Position::new(line, start_of_text(text)), EMPTY_CHECKBOX),
            }
        })
        .collect();

    CommandOutcome::edits(edits)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
