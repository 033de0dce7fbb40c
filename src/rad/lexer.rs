//! Lexer for rad scripts
//!
//! Lexing happens in two passes:
//!
//! 1. logos tokenizes the source into raw tokens. Inline whitespace and
//!    comments are skipped, physical line breaks stay as `Newline`. String
//!    literals are matched whole, interpolations included.
//! 2. The indentation transform turns physical lines into logical lines and
//!    synthesizes `Indent`, `Dedent` and `Eof`.
//!
//! Keeping the layout logic out of the logos definitions means the tokenizer
//! stays a vanilla logos lexer, and the layout rules live in one place.

pub mod indentation_transform;
pub mod lexer_impl;
pub mod strings;
pub mod tokens;

pub use indentation_transform::transform_indentation;
pub use lexer_impl::{tokenize, tokenize_until_error, tokenize_with_spans};
pub use strings::{split_string_body, RawStringPart, StringToken};
pub use tokens::Token;

use crate::rad::ast::{Position, SourceLocation};
use crate::rad::error::ParseError;
use crate::rad::parser::ParseOptions;
use serde::Serialize;
use std::ops::Range;
use tracing::debug;

/// A token with its byte range in the source
pub type TokenSpan = (Token, Range<usize>);

/// Fully processed tokens (tokenize + indentation transform) with default
/// options
pub fn lex(source: &str) -> Result<Vec<TokenSpan>, ParseError> {
    lex_with_options(source, &ParseOptions::default())
}

/// Fully processed tokens with their source spans
///
/// Synthetic tokens (`Indent`, `Dedent`, `Eof` and a final `Newline` added
/// when the source lacks one) have empty spans.
pub fn lex_with_options(source: &str, options: &ParseOptions) -> Result<Vec<TokenSpan>, ParseError> {
    let raw = tokenize_with_spans(source)?;
    debug!(raw_tokens = raw.len(), "tokenized source");
    let tokens = transform_indentation(source, raw, options.tab_width)?;
    debug!(tokens = tokens.len(), "applied indentation transform");
    Ok(tokens)
}

/// A processed token with its source text and start position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lexeme {
    pub token: Token,
    /// Empty for synthetic tokens
    pub text: String,
    pub position: Position,
}

/// Processed tokens resolved to text and line/column positions
pub fn lexemes(source: &str) -> Result<Vec<Lexeme>, ParseError> {
    lexemes_with_options(source, &ParseOptions::default())
}

pub fn lexemes_with_options(source: &str, options: &ParseOptions) -> Result<Vec<Lexeme>, ParseError> {
    let location = SourceLocation::new(source);
    Ok(lex_with_options(source, options)?
        .into_iter()
        .map(|(token, range)| Lexeme {
            text: source.get(range.clone()).unwrap_or_default().to_string(),
            position: location.byte_to_position(range.start),
            token,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        lex(source)
            .unwrap()
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn test_lex_pipeline() {
        let tokens = kinds("while x:\n    x -= 1\n");
        assert_eq!(
            tokens,
            vec![
                Token::While,
                Token::Identifier("x".to_string()),
                Token::Colon,
                Token::Newline,
                Token::Indent,
                Token::Identifier("x".to_string()),
                Token::MinusAssign,
                Token::Integer(1),
                Token::Newline,
                Token::Dedent,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_tab_width_option() {
        let options = ParseOptions {
            tab_width: 2,
            ..ParseOptions::default()
        };
        // one tab matches two spaces
        let source = "if a:\n\tb\n  c\n";
        assert!(lex_with_options(source, &options).is_ok());
        let err = lex(source).unwrap_err();
        assert!(err.is_indentation());
    }

    #[test]
    fn test_lexemes_carry_text_and_position() {
        let lexemes = lexemes("a\n  \nbb = 'x'\n").unwrap();
        let bb = &lexemes[2];
        assert_eq!(bb.token, Token::Identifier("bb".to_string()));
        assert_eq!(bb.text, "bb");
        assert_eq!(bb.position, Position::new(3, 1, 5));
        assert_eq!(lexemes[4].text, "'x'");
        let eof = lexemes.last().unwrap();
        assert_eq!(eof.token, Token::Eof);
        assert_eq!(eof.text, "");
    }
}
