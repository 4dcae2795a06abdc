//! Code-point buffer the grammar runs over.
//!
//! The source is decoded into `char`s once. The end of input is a position
//! rather than a stored character: [`Buffer::get`] yields `None` at and past
//! [`Buffer::len`], so every `char` a `&str` can hold, `U+10FFFF` included,
//! is ordinary input.

use crate::span::Span;

/// Normalized input: the source code points, terminated by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    chars: Vec<char>,
}

impl Buffer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
        }
    }

    /// Number of code points; also the offset of the end marker.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Code point at `offset`, or `None` at and past the end.
    pub fn get(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Text covered by `span`, clamped to the buffer contents.
    pub fn text(&self, span: Span) -> String {
        let end = span.end().min(self.len());
        let start = span.start().min(end);
        self.chars[start..end].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_is_positional() {
        let buffer = Buffer::new("ab");
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.get(0), Some('a'));
        assert_eq!(buffer.get(2), None);
        assert_eq!(buffer.get(99), None);
    }

    #[test]
    fn test_max_code_point_is_ordinary_input() {
        let buffer = Buffer::new("a\u{10FFFF}b");
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.get(1), Some('\u{10FFFF}'));
        assert_eq!(buffer.chars(), ['a', '\u{10FFFF}', 'b']);
    }

    #[test]
    fn test_empty_source() {
        let buffer = Buffer::new("");
        assert!(buffer.is_empty());
        assert_eq!(buffer.get(0), None);
        assert_eq!(buffer.text(Span::new(0..1)), "");
    }

    #[test]
    fn test_text_counts_code_points() {
        let buffer = Buffer::new("[Straße]");
        assert_eq!(buffer.text(Span::new(1..7)), "Straße");
        assert_eq!(buffer.text(Span::new(7..20)), "]");
    }
}
