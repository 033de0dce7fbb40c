//! Source location utilities for converting byte offsets to line/column positions
//!
//! Used by the lexer and parser to attach positions to tokens, AST nodes and
//! errors.

use super::span::{Position, Span};
use std::ops::Range;

/// Provides fast conversion from byte offsets to line/column positions
#[derive(Debug, Clone)]
pub struct SourceLocation<'src> {
    source: &'src str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'src> SourceLocation<'src> {
    /// Create a new SourceLocation from source code
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a 1-based line/column position
    ///
    /// Offsets past the end of the source clamp to the end.
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let byte_offset = byte_offset.min(self.source.len());
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..byte_offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(byte_offset - line_start);

        Position::new(line + 1, column + 1, byte_offset)
    }

    /// Convert a byte range to a span
    pub fn range_to_span(&self, range: &Range<usize>) -> Span {
        Span::new(
            self.byte_to_position(range.start),
            self.byte_to_position(range.end),
        )
    }

    /// Get the total number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the byte offset for the start of the line containing `byte_offset`
    pub fn line_start_of(&self, byte_offset: usize) -> usize {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);
        self.line_starts[line]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_to_position_single_line() {
        let loc = SourceLocation::new("Hello");
        assert_eq!(loc.byte_to_position(0), Position::new(1, 1, 0));
        assert_eq!(loc.byte_to_position(4), Position::new(1, 5, 4));
    }

    #[test]
    fn test_byte_to_position_multiline() {
        let loc = SourceLocation::new("Hello\nworld\ntest");

        assert_eq!(loc.byte_to_position(5), Position::new(1, 6, 5));
        assert_eq!(loc.byte_to_position(6), Position::new(2, 1, 6));
        assert_eq!(loc.byte_to_position(10), Position::new(2, 5, 10));
        assert_eq!(loc.byte_to_position(12), Position::new(3, 1, 12));
    }

    #[test]
    fn test_byte_to_position_counts_chars() {
        let loc = SourceLocation::new("é é x");
        // each 'é' is two bytes
        assert_eq!(loc.byte_to_position(6), Position::new(1, 5, 6));
    }

    #[test]
    fn test_offsets_past_end_clamp() {
        let loc = SourceLocation::new("ab\n");
        assert_eq!(loc.byte_to_position(99), Position::new(2, 1, 3));
    }

    #[test]
    fn test_range_to_span_multiline() {
        let loc = SourceLocation::new("Hello\nWorld\nTest");
        let span = loc.range_to_span(&(6..12));

        assert_eq!(span.start, Position::new(2, 1, 6));
        assert_eq!(span.end, Position::new(3, 1, 12));
    }

    #[test]
    fn test_line_helpers() {
        let loc = SourceLocation::new("one\n  two\nthree");
        assert_eq!(loc.line_count(), 3);
        assert_eq!(loc.line_start_of(6), 4);
        assert_eq!(loc.line_start_of(0), 0);
    }
}
