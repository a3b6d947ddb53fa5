//! Increment / decrement of a line's context
//!
//! A line's context is either a checkbox or the todo keyword slot of a
//! heading. Stepping a checkbox checks or unchecks it. Stepping a keyword
//! walks the configured list with a "no keyword" state at both ends:
//!
//! ```text
//! increment:  (none) -> TODO -> DONE -> (none)
//! decrement:  (none) -> DONE -> TODO -> (none)
//! ```

use super::{CommandOutcome, Warning};
use crate::document::{Document, Range, TextEdit};
use crate::outline::{CheckboxPrefix, KeywordPrefix, OutlineConfig, TodoKeywords};

/// Direction of a context step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Increment,
    Decrement,
}

/// What a line offers to increment or decrement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineContext {
    Checkbox(CheckboxPrefix),
    Keyword(KeywordPrefix),
}

/// Classify a line. Checkboxes are recognized before keywords.
pub fn detect_context(line: &str, config: &OutlineConfig) -> Option<LineContext> {
    if let Some(prefix) = config.checkbox_matcher().find(line) {
        return Some(LineContext::Checkbox(prefix));
    }
    config
        .keyword_matcher()
        .find(line)
        .map(LineContext::Keyword)
}

/// The keyword that follows `current` in the given direction, or `None`
/// when stepping off either end of the list.
///
/// A missing or unknown current keyword steps onto the first (increment) or
/// last (decrement) keyword.
pub fn next_keyword<'a>(
    keywords: &'a TodoKeywords,
    current: Option<&str>,
    step: Step,
) -> Option<&'a str> {
    match (current.and_then(|k| keywords.position(k)), step) {
        (None, Step::Increment) => keywords.first(),
        (None, Step::Decrement) => keywords.last(),
        (Some(index), Step::Increment) => keywords.get(index + 1),
        (Some(index), Step::Decrement) => index.checked_sub(1).and_then(|i| keywords.get(i)),
    }
}

fn checkbox_edit(line: usize, prefix: &CheckboxPrefix, step: Step, done: char) -> TextEdit {
    let symbol = match step {
        Step::Increment => done,
        Step::Decrement => ' ',
    };
    TextEdit::replace(
        Range::on_line(line, prefix.symbol_range.start, prefix.symbol_range.end),
        symbol.to_string(),
    )
}

fn keyword_edit(
    line: usize,
    prefix: &KeywordPrefix,
    step: Step,
    keywords: &TodoKeywords,
) -> Option<TextEdit> {
    let padded = Range::on_line(
        line,
        prefix.keyword_with_padding_range.start,
        prefix.keyword_with_padding_range.end,
    );
    let next = next_keyword(keywords, prefix.keyword.as_deref(), step);

    match (&prefix.keyword, next) {
        (None, Some(keyword)) => Some(TextEdit::insert(padded.start, format!(" {}", keyword))),
        (None, None) => None,
        (Some(_), None) => Some(TextEdit::delete(padded)),
        (Some(_), Some(keyword)) => Some(TextEdit::replace(padded, format!(" {}", keyword))),
    }
}

/// Step the context of every cursor line.
pub fn step_context<D>(
    document: &D,
    lines: &[usize],
    config: &OutlineConfig,
    step: Step,
) -> CommandOutcome
where
    D: Document + ?Sized,
{
    let mut found = false;
    let mut edits = Vec::new();

    for &line in lines {
        let edit = match detect_context(document.line(line), config) {
            Some(LineContext::Checkbox(prefix)) => Some(checkbox_edit(
                line,
                &prefix,
                step,
                config.checkbox_symbol(),
            )),
            Some(LineContext::Keyword(prefix)) => {
                keyword_edit(line, &prefix, step, config.keywords())
            }
            None => continue,
        };
        found = true;
        edits.extend(edit);
    }

    if !found {
        return CommandOutcome::warning(match step {
            Step::Increment => Warning::NothingToIncrement,
            Step::Decrement => Warning::NothingToDecrement,
        });
    }
    CommandOutcome::edits(edits)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
