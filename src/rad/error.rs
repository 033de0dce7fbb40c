//! Error types for lexing and parsing rad scripts
//!
//! Parsing fails fast: the first error aborts the parse and is returned to the
//! caller. Every error carries the position of the offending token.

use crate::rad::ast::Position;
use thiserror::Error;

/// The error returned by the lexer and parser.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("{position}: indentation error: {kind}")]
    Indentation {
        kind: IndentationErrorKind,
        position: Position,
    },

    #[error("{position}: lex error: {kind}")]
    Lex { kind: LexErrorKind, position: Position },

    #[error("{position}: syntax error in {production}: {kind}")]
    Syntax {
        kind: SyntaxErrorKind,
        production: &'static str,
        position: Position,
    },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Indentation { position, .. }
            | ParseError::Lex { position, .. }
            | ParseError::Syntax { position, .. } => *position,
        }
    }

    pub fn is_indentation(&self) -> bool {
        matches!(self, ParseError::Indentation { .. })
    }

    pub fn is_lex(&self) -> bool {
        matches!(self, ParseError::Lex { .. })
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, ParseError::Syntax { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndentationErrorKind {
    /// A dedent landed on a width that was never pushed.
    #[error("unindent to width {width} does not match any outer indentation level")]
    InconsistentDedent { width: usize },

    #[error("indentation mixes tabs and spaces")]
    MixedTabsAndSpaces,

    #[error("unexpected indent")]
    UnexpectedIndent,
}

/// Lexical errors. Doubles as the logos error type, hence `Default`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
pub enum LexErrorKind {
    #[default]
    #[error("illegal character")]
    IllegalCharacter,

    #[error("illegal character '{0}'")]
    UnexpectedCharacter(char),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),

    #[error("unbalanced braces in string interpolation")]
    UnbalancedInterpolation,

    #[error("string interpolation is nested too deeply")]
    InterpolationTooDeep,

    #[error("unclosed '{0}'")]
    UnclosedBracket(char),

    #[error("invalid number literal")]
    InvalidNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: String },

    #[error("cannot assign to {0}")]
    InvalidAssignmentTarget(String),

    #[error("invalid loop pattern: {0}")]
    InvalidPattern(String),

    #[error("positional argument follows keyword argument")]
    PositionalAfterKeyword,

    #[error("unknown type '{0}'")]
    UnknownType(String),

    #[error("nesting is too deep (maximum {0} levels)")]
    NestingTooDeep(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position_and_production() {
        let err = ParseError::Syntax {
            kind: SyntaxErrorKind::Expected {
                expected: "':'".to_string(),
                found: "newline".to_string(),
            },
            production: "if statement",
            position: Position::new(1, 8, 7),
        };
        assert_eq!(
            err.to_string(),
            "1:8: syntax error in if statement: expected ':', found newline"
        );
        assert!(err.is_syntax());
        assert_eq!(err.position().line, 1);
    }

    #[test]
    fn test_lex_error_display() {
        let err = ParseError::Lex {
            kind: LexErrorKind::InvalidEscape('q'),
            position: Position::new(3, 5, 20),
        };
        assert_eq!(err.to_string(), "3:5: lex error: invalid escape sequence '\\q'");
    }

    #[test]
    fn test_indentation_error_display() {
        let err = ParseError::Indentation {
            kind: IndentationErrorKind::InconsistentDedent { width: 1 },
            position: Position::new(3, 2, 15),
        };
        assert!(err.is_indentation());
        assert_eq!(
            err.to_string(),
            "3:2: indentation error: unindent to width 1 does not match any outer indentation level"
        );
    }
}
