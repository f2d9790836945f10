//! Text utilities for offsets and single-line values.
//!
//! Caret offsets are counted in chars (Unicode scalar values); byte indices are only used when
//! slicing Rust strings.

use std::borrow::Cow;

/// Number of chars in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of the char at `char_offset`, clamped to `s.len()`.
///
/// ```
/// use input_core::char_to_byte;
///
/// assert_eq!(char_to_byte("a€b", 2), 4);
/// assert_eq!(char_to_byte("a€b", 9), 5);
/// ```
pub fn char_to_byte(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map_or(s.len(), |(index, _)| index)
}

/// Filter a string to remove newlines (CR and LF), for single-line inputs.
///
/// Returns a `Cow::Borrowed` if the string contains no newlines (fast path),
/// or a `Cow::Owned` with newlines removed.
///
/// ```
/// use input_core::filter_single_line;
///
/// assert_eq!(filter_single_line("hello"), "hello");
/// assert_eq!(filter_single_line("a\r\nb"), "ab");
/// ```
pub fn filter_single_line(s: &str) -> Cow<'_, str> {
    if !s.contains(['\n', '\r']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| *c != '\n' && *c != '\r').collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_byte_conversions() {
        let s = "a€b";
        assert_eq!(char_len(s), 3);
        assert_eq!(char_to_byte(s, 0), 0);
        assert_eq!(char_to_byte(s, 1), 1);
        assert_eq!(char_to_byte(s, 3), 5);
    }

    #[test]
    fn filter_single_line_basic() {
        assert_eq!(filter_single_line("hello"), "hello");
        assert_eq!(filter_single_line("hello\nworld"), "helloworld");
        assert_eq!(filter_single_line("a\r\nb"), "ab");
        assert_eq!(filter_single_line("\n\r"), "");
        assert!(matches!(filter_single_line("x"), Cow::Borrowed(_)));
    }
}
