//! Outline editing commands
//!
//! Every command is a pure function of the document text, the cursors and
//! the outline configuration. It reads the text once, computes all edits in
//! pre-edit coordinates and returns them as a [`CommandOutcome`]; the host
//! applies the batch atomically. "Nothing to do" is reported as a
//! [`Warning`], never as an error.
//!
//! # Usage
//! ```ignore
//! use crate::commands::{execute, Command};
//!
//! let outcome = execute(Command::DemoteHeading, &buffer, buffer.cursors(), &config);
//! buffer.apply_edits(&outcome.edits);
//! ```

mod checkboxes;
mod context;
mod headings;
mod trees;

pub use context::{detect_context, next_keyword, LineContext, Step};

use crate::document::{Document, Position, TextEdit};
use crate::outline::OutlineConfig;
use log::debug;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Command Enum
// ─────────────────────────────────────────────────────────────────────────────

/// The commands exposed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    InsertHeading,
    InsertSubheading,
    ToggleLineHeading,
    DemoteHeading,
    PromoteHeading,
    DemoteTree,
    PromoteTree,
    ToggleLineCheckbox,
    IncrementContext,
    DecrementContext,
}

impl Command {
    /// All commands in menu order.
    pub fn all() -> &'static [Command] {
        &[
            Command::InsertHeading,
            Command::InsertSubheading,
            Command::ToggleLineHeading,
            Command::DemoteHeading,
            Command::PromoteHeading,
            Command::DemoteTree,
            Command::PromoteTree,
            Command::ToggleLineCheckbox,
            Command::IncrementContext,
            Command::DecrementContext,
        ]
    }

    /// Stable command identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Command::InsertHeading => "insert-heading",
            Command::InsertSubheading => "insert-subheading",
            Command::ToggleLineHeading => "toggle-line-heading",
            Command::DemoteHeading => "demote-heading",
            Command::PromoteHeading => "promote-heading",
            Command::DemoteTree => "demote-tree",
            Command::PromoteTree => "promote-tree",
            Command::ToggleLineCheckbox => "toggle-line-checkbox",
            Command::IncrementContext => "increment-context",
            Command::DecrementContext => "decrement-context",
        }
    }

    /// Human readable label.
    pub fn title(&self) -> &'static str {
        match self {
            Command::InsertHeading => "Insert Heading",
            Command::InsertSubheading => "Insert Subheading",
            Command::ToggleLineHeading => "Toggle Line/Heading",
            Command::DemoteHeading => "Demote Heading",
            Command::PromoteHeading => "Promote Heading",
            Command::DemoteTree => "Demote Subtree",
            Command::PromoteTree => "Promote Subtree",
            Command::ToggleLineCheckbox => "Toggle Line/Checkbox",
            Command::IncrementContext => "Increment Context",
            Command::DecrementContext => "Decrement Context",
        }
    }

    /// Look up a command by its identifier.
    pub fn from_id(id: &str) -> Option<Command> {
        Self::all().iter().copied().find(|command| command.id() == id)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Outcome
// ─────────────────────────────────────────────────────────────────────────────

/// A non-blocking "nothing to do" notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    NoLineToDemote,
    NoLineToPromote,
    NoSectionToDemote,
    NoSectionToPromote,
    NoSectionForSubheading,
    NothingToIncrement,
    NothingToDecrement,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Warning::NoLineToDemote => "No line to demote",
            Warning::NoLineToPromote => "No line to promote",
            Warning::NoSectionToDemote => "No section to demote",
            Warning::NoSectionToPromote => "No section to promote",
            Warning::NoSectionForSubheading => "No section to insert subheading into",
            Warning::NothingToIncrement => "Nothing to increment",
            Warning::NothingToDecrement => "Nothing to decrement",
        };
        f.write_str(message)
    }
}

/// Result of running a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Edit batch in pre-edit coordinates
    pub edits: Vec<TextEdit>,
    /// Cursors to set before the batch is applied (pre-edit coordinates)
    pub cursors: Option<Vec<Position>>,
    /// Warning to show instead of editing
    pub warning: Option<Warning>,
}

impl CommandOutcome {
    pub fn edits(edits: Vec<TextEdit>) -> Self {
        Self {
            edits,
            ..Self::default()
        }
    }

    pub fn warning(warning: Warning) -> Self {
        Self {
            warning: Some(warning),
            ..Self::default()
        }
    }

    /// Request a cursor position alongside the edits.
    pub fn with_cursor(self, cursor: Position) -> Self {
        self.with_cursors(vec![cursor])
    }

    /// Request cursor positions, primary first, in pre-edit coordinates.
    pub fn with_cursors(mut self, cursors: Vec<Position>) -> Self {
        self.cursors = Some(cursors);
        self
    }

    /// Whether the command left everything untouched.
    pub fn is_noop(&self) -> bool {
        self.edits.is_empty() && self.cursors.is_none()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Run `command` against a document and its cursors.
///
/// The first cursor is the primary one; structural commands only look at it.
/// An empty cursor list means there is no active editor and yields an empty
/// outcome.
pub fn execute<D>(
    command: Command,
    document: &D,
    cursors: &[Position],
    config: &OutlineConfig,
) -> CommandOutcome
where
    D: Document + ?Sized,
{
    let Some(&primary) = cursors.first() else {
        debug!("{}: no cursor, skipping", command);
        return CommandOutcome::default();
    };

    let outcome = match command {
        Command::InsertHeading => headings::insert_heading(document, primary),
        Command::InsertSubheading => headings::insert_subheading(document, primary),
        Command::ToggleLineHeading => headings::toggle_line_heading(document, cursors),
        Command::DemoteHeading => headings::demote_headings(document, &cursor_lines(cursors)),
        Command::PromoteHeading => headings::promote_headings(document, &cursor_lines(cursors)),
        Command::DemoteTree => trees::demote_tree(document, primary),
        Command::PromoteTree => trees::promote_tree(document, primary),
        Command::ToggleLineCheckbox => {
            checkboxes::toggle_checkboxes(document, &cursor_lines(cursors), config)
        }
        Command::IncrementContext => {
            context::step_context(document, &cursor_lines(cursors), config, Step::Increment)
        }
        Command::DecrementContext => {
            context::step_context(document, &cursor_lines(cursors), config, Step::Decrement)
        }
    };

    debug!(
        "{}: {} edit(s){}",
        command,
        outcome.edits.len(),
        outcome
            .warning
            .map(|w| format!(", warning: {}", w))
            .unwrap_or_default()
    );
    outcome
}

/// Cursor lines in cursor order, one entry per line.
fn cursor_lines(cursors: &[Position]) -> Vec<usize> {
    let mut lines: Vec<usize> = Vec::with_capacity(cursors.len());
    for cursor in cursors {
        if !lines.contains(&cursor.line) {
            lines.push(cursor.line);
        }
    }
    lines
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Support
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::document::TextBuffer;

    /// Text, cursors and warning after a command ran on a buffer.
    #[derive(Debug)]
    pub struct Run {
        pub text: String,
        pub cursors: Vec<Position>,
        pub warning: Option<Warning>,
    }

    /// Run `command` with the default configuration.
    pub fn run(command: Command, text: &str, cursors: &[(usize, usize)]) -> Run {
        run_with(command, text, cursors, &OutlineConfig::default())
    }

    /// Run `command` the way a host would: set requested cursors, then apply
    /// the batch.
    pub fn run_with(
        command: Command,
        text: &str,
        cursors: &[(usize, usize)],
        config: &OutlineConfig,
    ) -> Run {
        let mut buffer = TextBuffer::new(text);
        buffer.set_cursors(
            cursors
                .iter()
                .map(|&(line, character)| Position::new(line, character))
                .collect(),
        );

        let outcome = execute(command, &buffer, buffer.cursors(), config);
        if let Some(requested) = outcome.cursors {
            buffer.set_cursors(requested);
        }
        buffer.apply_edits(&outcome.edits);

        Run {
            text: buffer.to_text(),
            cursors: buffer.cursors().to_vec(),
            warning: outcome.warning,
        }
    }

    /// Assert text and primary cursor after a single-cursor run.
    pub fn check(
        command: Command,
        input: &str,
        cursor: (usize, usize),
        output: &str,
        final_cursor: (usize, usize),
    ) {
        let result = run(command, input, &[cursor]);
        assert_eq!(result.text, output, "{} on {:?}", command, input);
        assert_eq!(
            result.cursors[0],
            Position::new(final_cursor.0, final_cursor.1),
            "{} cursor on {:?}",
            command,
            input
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
