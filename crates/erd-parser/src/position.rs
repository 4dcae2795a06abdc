//! Offset to line/column translation.

use std::fmt;

use crate::buffer::Buffer;

/// A human-readable location: 1-based line, 0-based column in code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextPosition {
    line: usize,
    column: usize,
}

impl TextPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} col {}", self.line, self.column)
    }
}

/// Positions for a set of offsets, looked up by offset.
#[derive(Debug, Clone, Default)]
pub struct PositionMap {
    entries: Vec<(usize, TextPosition)>,
}

impl PositionMap {
    /// Position of `offset`, if it was among the translated offsets.
    pub fn get(&self, offset: usize) -> Option<TextPosition> {
        self.entries
            .binary_search_by_key(&offset, |(o, _)| *o)
            .ok()
            .map(|index| self.entries[index].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Translate `offsets` into line/column positions with a single scan of
/// `buffer`.
///
/// Line breaks are the ones the grammar accepts: LF, CRLF and a lone CR.
/// A CRLF pair counts once. Offsets at or beyond the end of the buffer
/// map to the position just after the last character.
pub fn translate_positions(buffer: &Buffer, offsets: &[usize]) -> PositionMap {
    let mut pending = offsets.to_vec();
    pending.sort_unstable();
    pending.dedup();

    let mut entries = Vec::with_capacity(pending.len());
    let mut pending = pending.into_iter().peekable();
    let mut line = 1;
    let mut column = 0;

    let chars = buffer.chars();
    for (offset, &c) in chars.iter().enumerate() {
        while let Some(next) = pending.next_if_eq(&offset) {
            entries.push((next, TextPosition::new(line, column)));
        }
        if pending.peek().is_none() {
            break;
        }
        let breaks = match c {
            '\n' => true,
            '\r' => chars.get(offset + 1) != Some(&'\n'),
            _ => false,
        };
        if breaks {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }

    let end = TextPosition::new(line, column);
    entries.extend(pending.map(|offset| (offset, end)));

    PositionMap { entries }
}
