//! Position and span tracking for source code locations
//!
//! Lines and columns are 1-based; columns count characters, not bytes. The
//! byte offset is kept alongside so tooling can slice the source directly.

use serde::Serialize;
use std::fmt;

/// Represents a position in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Represents a span in source code (start and end positions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Check if a position is contained within this span
    pub fn contains(&self, pos: Position) -> bool {
        self.start.offset <= pos.offset && pos.offset <= self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_takes_outer_bounds() {
        let a = Span::new(Position::new(1, 1, 0), Position::new(1, 4, 3));
        let b = Span::new(Position::new(1, 6, 5), Position::new(2, 2, 9));
        let merged = a.merge(b);
        assert_eq!(merged.start, a.start);
        assert_eq!(merged.end, b.end);
        assert_eq!(b.merge(a), merged);
    }

    #[test]
    fn test_contains() {
        let span = Span::new(Position::new(1, 3, 2), Position::new(1, 8, 7));
        assert!(span.contains(Position::new(1, 3, 2)));
        assert!(span.contains(Position::new(1, 8, 7)));
        assert!(!span.contains(Position::new(1, 9, 8)));
    }

    #[test]
    fn test_display() {
        let span = Span::new(Position::new(2, 5, 10), Position::new(3, 1, 20));
        assert_eq!(span.to_string(), "2:5..3:1");
    }
}
