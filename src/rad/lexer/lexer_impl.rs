//! Raw tokenization of rad source
//!
//! This runs logos over the source and collects tokens with their byte spans.
//! The output still contains physical `Newline` tokens; indentation is handled
//! by the next pass.

use super::tokens::Token;
use super::TokenSpan;
use crate::rad::ast::SourceLocation;
use crate::rad::error::{LexErrorKind, ParseError};
use logos::Logos;
use std::ops::Range;

/// Tokenize until the end of input or the first lexical error.
///
/// Tokens before the error are kept, so callers that only need a prefix of
/// the input (interpolations) can still use them.
pub fn tokenize_until_error(source: &str) -> (Vec<TokenSpan>, Option<(LexErrorKind, Range<usize>)>) {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(kind) => {
                let kind = match kind {
                    LexErrorKind::IllegalCharacter => lexer
                        .slice()
                        .chars()
                        .next()
                        .map_or(LexErrorKind::IllegalCharacter, LexErrorKind::UnexpectedCharacter),
                    other => other,
                };
                return (tokens, Some((kind, lexer.span())));
            }
        }
    }

    (tokens, None)
}

/// Tokenize a whole source, failing on the first lexical error
pub fn tokenize_with_spans(source: &str) -> Result<Vec<TokenSpan>, ParseError> {
    match tokenize_until_error(source) {
        (tokens, None) => Ok(tokens),
        (_, Some((kind, span))) => Err(ParseError::Lex {
            kind,
            position: SourceLocation::new(source).byte_to_position(span.start),
        }),
    }
}

/// Tokenize and drop the spans
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    Ok(tokenize_with_spans(source)?
        .into_iter()
        .map(|(token, _)| token)
        .collect())
}
