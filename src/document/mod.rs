//! Host document abstraction
//!
//! The outline core reads documents only through the [`Document`] trait
//! (line count and line text) and writes them only by returning batches of
//! [`TextEdit`]s expressed in pre-edit coordinates. [`TextBuffer`] is the
//! in-memory host used by the session, the command line and the tests.

mod buffer;
mod position;

pub use buffer::TextBuffer;
pub use position::{Position, Range, TextEdit};

/// Read-only view of a document as an ordered sequence of lines.
pub trait Document {
    /// Total number of lines. An empty document still has one empty line.
    fn line_count(&self) -> usize;

    /// Text of the line at `index` without its line terminator.
    fn line_text(&self, index: usize) -> Option<&str>;

    /// Text of the line at `index`, or `""` when out of range.
    fn line(&self, index: usize) -> &str {
        self.line_text(index).unwrap_or("")
    }
}

impl<S: AsRef<str>> Document for [S] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_text(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_document() {
        let lines = ["# 1", "content"];
        let doc: &[&str] = &lines;
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line(1), "content");
        assert_eq!(doc.line_text(2), None);
        assert_eq!(doc.line(2), "");
    }

    #[test]
    fn test_owned_lines_document() {
        let lines = vec!["## a".to_string()];
        assert_eq!(lines.as_slice().line(0), "## a");
    }
}
