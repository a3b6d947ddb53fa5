//! UTF-8 Safe Column Utilities
//!
//! Editor columns in this crate are counted in characters (Unicode scalar
//! values), while `regex` matches and `str` slicing work in bytes. These
//! helpers convert between the two without ever panicking on an index that
//! falls inside a multi-byte character or past the end of the string.
//!
//! # Example
//! ```ignore
//! use crate::string_utils::{byte_to_char, char_to_byte};
//!
//! let line = "# Hei på deg";
//! assert_eq!(char_to_byte(line, 8), 9); // 'å' is 2 bytes
//! assert_eq!(byte_to_char(line, 9), 8);
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Character Boundary Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Returns the largest index that is less than or equal to `index`
/// and is on a UTF-8 character boundary.
///
/// If `index` is greater than the string length, returns the string length.
#[inline]
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }

    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

// ─────────────────────────────────────────────────────────────────────────────
// Index Conversion Utilities
// ─────────────────────────────────────────────────────────────────────────────

/// Number of characters in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Convert a character column to a byte index.
///
/// Returns the string length if `column` is beyond the string.
pub fn char_to_byte(s: &str, column: usize) -> usize {
    s.char_indices()
        .nth(column)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Convert a byte index to a character column.
///
/// If the byte index is in the middle of a character, it counts
/// up to (but not including) that character.
pub fn byte_to_char(s: &str, byte_index: usize) -> usize {
    let byte_index = floor_char_boundary(s, byte_index);
    s[..byte_index].chars().count()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_ascii() {
        let s = "Hello";
        assert_eq!(floor_char_boundary(s, 0), 0);
        assert_eq!(floor_char_boundary(s, 2), 2);
        assert_eq!(floor_char_boundary(s, 10), 5); // Beyond end
    }

    #[test]
    fn test_floor_norwegian() {
        let s = "Hei på deg"; // 'å' at byte 5-6 (2 bytes)
        assert_eq!(floor_char_boundary(s, 5), 5);
        assert_eq!(floor_char_boundary(s, 6), 5); // Middle of 'å'
        assert_eq!(floor_char_boundary(s, 7), 7);
    }

    #[test]
    fn test_char_len_multibyte() {
        assert_eq!(char_len(""), 0);
        assert_eq!(char_len("# 你好"), 4);
        assert_eq!(char_len("- [✓] 🎉"), 7);
    }

    #[test]
    fn test_char_to_byte() {
        let s = "# Hei på deg";
        assert_eq!(char_to_byte(s, 0), 0);
        assert_eq!(char_to_byte(s, 7), 7); // 'å'
        assert_eq!(char_to_byte(s, 8), 9); // ' ' after 'å'
        assert_eq!(char_to_byte(s, 100), s.len());
    }

    #[test]
    fn test_byte_to_char() {
        let s = "你好 world";
        assert_eq!(byte_to_char(s, 0), 0);
        assert_eq!(byte_to_char(s, 3), 1);
        assert_eq!(byte_to_char(s, 4), 1); // Inside '好'
        assert_eq!(byte_to_char(s, 6), 2);
        assert_eq!(byte_to_char(s, 100), char_len(s));
    }
}
