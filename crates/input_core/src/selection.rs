//! Text selection representation.

/// A selection in flattened text, as char offsets.
///
/// The range is always normalized such that `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    /// Start char offset of the selection (inclusive).
    pub start: usize,
    /// End char offset of the selection (exclusive).
    pub end: usize,
}

impl SelectionRange {
    /// Create a new selection range.
    ///
    /// The range is automatically normalized so `start <= end`.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    #[inline]
    pub fn collapsed(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Returns `true` if the selection is empty (zero-width).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the length of the selection in chars.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns the selected substring of `value`, clamped to its length.
    pub fn slice<'a>(&self, value: &'a str) -> &'a str {
        let start = crate::text::char_to_byte(value, self.start);
        let end = crate::text::char_to_byte(value, self.end);
        &value[start..end]
    }
}
