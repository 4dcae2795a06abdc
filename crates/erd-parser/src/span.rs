//! Source spans over the code-point buffer.

use std::{fmt, ops::Range};

/// A half-open interval `[start, end)` of code-point offsets.
///
/// Offsets count characters, not bytes; use [`Span::to_byte_range`] to slice
/// the original `&str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a range
    pub fn new(range: Range<usize>) -> Self {
        debug_assert!(range.start <= range.end, "span start after end");
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Create a union of two spans (encompassing both)
    pub fn union(&self, other: Span) -> Span {
        Self::new(self.start.min(other.start)..self.end.max(other.end))
    }

    /// True if `other` lies entirely inside this span.
    pub fn contains(&self, other: Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Convert to a byte range into `source`.
    ///
    /// Offsets past the end of `source` clamp to `source.len()`.
    pub fn to_byte_range(&self, source: &str) -> Range<usize> {
        let mut start = source.len();
        let mut end = source.len();
        for (index, (byte, _)) in source.char_indices().enumerate() {
            if index == self.start {
                start = byte;
            }
            if index == self.end {
                end = byte;
                break;
            }
        }
        start..end.max(start)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A value paired with the span it was read from.
///
/// `Spanned<T>` lets collaborators report diagnostics at the exact location of
/// a captured name or value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spanned<T> {
    value: T,
    span: Span,
}

impl<T> Spanned<T> {
    /// Create a new spanned value from a value and span information
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Get a reference to the underlying value
    pub fn inner(&self) -> &T {
        &self.value
    }

    /// Consume the Spanned wrapper and return just the inner value
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Convert from one spanned type to another using the provided function
    ///
    /// This maintains the same span information while transforming the value.
    pub fn map<F, U>(&self, f: F) -> Spanned<U>
    where
        F: FnOnce(&T) -> U,
    {
        Spanned {
            value: f(&self.value),
            span: self.span,
        }
    }
}

impl<T> std::ops::Deref for Spanned<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T: fmt::Display> fmt::Display for Spanned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

// PartialEq compares only the inner values, ignoring span information
impl<T: PartialEq> PartialEq for Spanned<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value.eq(&other.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basic_functionality() {
        let span = Span::new(5..10);
        assert_eq!(span.start(), 5);
        assert_eq!(span.end(), 10);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_span_empty() {
        let span = Span::new(5..5);
        assert_eq!(span.len(), 0);
        assert!(span.is_empty());
    }

    #[test]
    fn test_span_union() {
        let union = Span::new(5..10).union(Span::new(15..20));
        assert_eq!(union, Span::new(5..20));
    }

    #[test]
    fn test_span_contains() {
        let outer = Span::new(2..10);
        assert!(outer.contains(Span::new(2..10)));
        assert!(outer.contains(Span::new(4..4)));
        assert!(!outer.contains(Span::new(1..3)));
        assert!(!outer.contains(Span::new(9..11)));
    }

    #[test]
    fn test_to_byte_range_ascii() {
        let source = "[Person]";
        assert_eq!(Span::new(1..7).to_byte_range(source), 1..7);
    }

    #[test]
    fn test_to_byte_range_multibyte() {
        // 'ß' is two bytes, 'ü' is two bytes
        let source = "[Straße]\nFüße";
        let range = Span::new(1..7).to_byte_range(source);
        assert_eq!(&source[range], "Straße");

        let range = Span::new(9..13).to_byte_range(source);
        assert_eq!(&source[range], "Füße");
    }

    #[test]
    fn test_to_byte_range_clamps_past_end() {
        let source = "ab";
        assert_eq!(Span::new(1..5).to_byte_range(source), 1..2);
        assert_eq!(Span::new(4..5).to_byte_range(source), 2..2);
    }

    #[test]
    fn test_spanned_map_keeps_span() {
        let spanned = Spanned::new("Person", Span::new(1..7));
        let upper = spanned.map(|name| name.to_uppercase());
        assert_eq!(upper.inner(), "PERSON");
        assert_eq!(upper.span(), Span::new(1..7));
        assert_eq!(*spanned, "Person");
    }
}
