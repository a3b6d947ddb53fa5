//! Subtree commands
//!
//! Demote or promote a section heading together with every descendant
//! heading inside its scope. Descendants are selected once, against the
//! section's depth before any edit, so relative nesting is preserved.

use super::{CommandOutcome, Warning};
use crate::document::{Document, Position, Range, TextEdit};
use crate::outline::{is_descendant_heading, marker_run, resolve_scope, HEADING_MARKER, MAX_DEPTH};
use log::debug;

/// Add one marker to the section heading and each descendant heading.
pub fn demote_tree<D>(document: &D, cursor: Position) -> CommandOutcome
where
    D: Document + ?Sized,
{
    let Some(scope) = resolve_scope(document, cursor) else {
        return CommandOutcome::warning(Warning::NoSectionToDemote);
    };
    if scope.depth >= MAX_DEPTH {
        debug!("Section at line {} is already at maximum depth", scope.start.line);
        return CommandOutcome::default();
    }

    let marker = HEADING_MARKER.to_string();
    let mut edits = vec![TextEdit::insert(scope.start, marker.clone())];
    edits.extend(
        scope
            .body_lines()
            .filter(|&line| {
                let text = document.line(line);
                is_descendant_heading(text, scope.depth) && marker_run(text) < MAX_DEPTH
            })
            .map(|line| TextEdit::insert(Position::new(line, 0), marker.clone())),
    );

    CommandOutcome::edits(edits)
}

/// Remove one marker from the section heading (unless it is top level) and
/// from each descendant heading.
pub fn promote_tree<D>(document: &D, cursor: Position) -> CommandOutcome
where
    D: Document + ?Sized,
{
    let Some(scope) = resolve_scope(document, cursor) else {
        return CommandOutcome::warning(Warning::NoSectionToPromote);
    };

    let mut edits = Vec::new();
    if scope.depth > 1 {
        edits.push(TextEdit::delete(Range::on_line(scope.start.line, 0, 1)));
    }
    edits.extend(
        scope
            .body_lines()
            .filter(|&line| is_descendant_heading(document.line(line), scope.depth))
            .map(|line| TextEdit::delete(Range::on_line(line, 0, 1))),
    );

    CommandOutcome::edits(edits)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::super::test_support::{check, run};
    use super::super::{Command, Warning};

    const TREE: &str = "# 1\n## 1.1\n### 1.1.1\n# 2\n## 2.1\n### 2.1.1\n### 2.1.2";

    #[test]
    fn test_demote_tree_from_root() {
        let result = run(Command::DemoteTree, TREE, &[(0, 0)]);
        assert_eq!(
            result.text,
            "## 1\n### 1.1\n#### 1.1.1\n# 2\n## 2.1\n### 2.1.1\n### 2.1.2"
        );
    }

    #[test]
    fn test_demote_tree_from_body_line() {
        let result = run(Command::DemoteTree, TREE, &[(5, 3)]);
        assert_eq!(
            result.text,
            "# 1\n## 1.1\n### 1.1.1\n# 2\n## 2.1\n#### 2.1.1\n### 2.1.2"
        );

        let result = run(Command::DemoteTree, TREE, &[(4, 0)]);
        assert_eq!(
            result.text,
            "# 1\n## 1.1\n### 1.1.1\n# 2\n### 2.1\n#### 2.1.1\n#### 2.1.2"
        );
    }

    #[test]
    fn test_demote_tree_moves_cursor_with_heading() {
        check(
            Command::DemoteTree,
            "# a\ntext\n## b",
            (2, 3),
            "# a\ntext\n### b",
            (2, 4),
        );
    }

    #[test]
    fn test_demote_tree_skips_body_and_max_depth_descendants() {
        let result = run(
            Command::DemoteTree,
            "## a\n#notheading\nplain\n###### six\n### three",
            &[(0, 0)],
        );
        assert_eq!(
            result.text,
            "### a\n#notheading\nplain\n###### six\n#### three"
        );
    }

    #[test]
    fn test_demote_tree_at_max_depth_is_silent() {
        let result = run(Command::DemoteTree, "###### six\nbody", &[(1, 0)]);
        assert_eq!(result.text, "###### six\nbody");
        assert_eq!(result.warning, None);
    }

    #[test]
    fn test_demote_tree_without_section_warns() {
        let result = run(Command::DemoteTree, "text\nmore", &[(1, 0)]);
        assert_eq!(result.text, "text\nmore");
        assert_eq!(result.warning, Some(Warning::NoSectionToDemote));
    }

    #[test]
    fn test_promote_tree() {
        let result = run(Command::PromoteTree, TREE, &[(4, 2)]);
        assert_eq!(
            result.text,
            "# 1\n## 1.1\n### 1.1.1\n# 2\n# 2.1\n## 2.1.1\n## 2.1.2"
        );
    }

    #[test]
    fn test_promote_tree_top_level_still_promotes_descendants() {
        let result = run(Command::PromoteTree, TREE, &[(0, 0)]);
        assert_eq!(
            result.text,
            "# 1\n# 1.1\n## 1.1.1\n# 2\n## 2.1\n### 2.1.1\n### 2.1.2"
        );
    }

    #[test]
    fn test_promote_tree_ignores_trailing_blank_lines() {
        let result = run(Command::PromoteTree, "## a\n### b\n\n\n# c", &[(1, 0)]);
        assert_eq!(result.text, "## a\n## b\n\n\n# c");
    }

    #[test]
    fn test_promote_tree_without_section_warns() {
        let result = run(Command::PromoteTree, "", &[(0, 0)]);
        assert_eq!(result.warning, Some(Warning::NoSectionToPromote));
    }

    #[test]
    fn test_demote_then_promote_restores_tree() {
        let demoted = run(Command::DemoteTree, TREE, &[(3, 0)]).text;
        let restored = run(Command::PromoteTree, &demoted, &[(3, 0)]).text;
        assert_eq!(restored, TREE);
    }
}
