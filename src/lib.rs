//! mdorg - org-mode style outline editing for Markdown
//!
//! Treats a Markdown document as an outline of nested headings, checkboxes
//! and todo keywords. The core works on plain line text and (line, column)
//! coordinates and returns edit batches for a host buffer to apply:
//!
//! - [`outline`]: line prefixes, heading scopes and keyword configuration
//! - [`commands`]: heading, subtree, checkbox and keyword commands
//! - [`decorations`]: debounced keyword highlighting by priority
//! - [`host`]: session and event wiring around an in-memory buffer

pub mod commands;
pub mod config;
pub mod decorations;
pub mod document;
pub mod error;
pub mod host;
pub mod outline;
pub mod string_utils;

pub use commands::{Command, CommandOutcome, Warning};
pub use document::{Position, Range, TextBuffer, TextEdit};
pub use error::{Error, Result};
pub use host::Session;
