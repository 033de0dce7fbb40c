//! String literals and their interpolations
//!
//! The tokenizer hands over a string token with its raw body. Here the body is
//! split into text and `{...}` parts, and every interpolation source is lexed
//! and parsed as an expression by a nested parser. Token spans of the nested
//! stream are shifted to absolute offsets so positions in errors and in the
//! tree refer to the enclosing file.
//!
//! An interpolation may end with `:spec`, a format specifier kept verbatim.

use super::parser::Parser;
use crate::rad::ast::{StringLiteral, StringPart};
use crate::rad::error::ParseError;
use crate::rad::lexer::{split_string_body, tokenize_until_error, RawStringPart, Token};

impl Parser<'_> {
    /// Consumes a string token and resolves its parts.
    pub(super) fn parse_string_literal(&mut self) -> Result<StringLiteral, ParseError> {
        let (token, range) = self.advance();
        let Token::String(string) = token else {
            return Err(self.error_expected("string literal", "string literal"));
        };

        let body_start = range.start + string.quote.delimiter().len();
        let raw_parts = split_string_body(&string.body, string.quote).map_err(|kind| ParseError::Lex {
            kind,
            position: self.location.byte_to_position(range.start),
        })?;

        let mut parts = Vec::with_capacity(raw_parts.len());
        for part in raw_parts {
            parts.push(match part {
                RawStringPart::Text(text) => StringPart::Text(text),
                RawStringPart::Interpolation { offset, source } => {
                    self.parse_interpolation(source, body_start + offset)?
                }
            });
        }

        Ok(StringLiteral {
            quote: string.quote,
            parts,
        })
    }

    /// Parses the source between `{` and `}`, which starts at byte `base` of
    /// the file.
    fn parse_interpolation(&mut self, source: &str, base: usize) -> Result<StringPart, ParseError> {
        let (raw, lex_error) = tokenize_until_error(source);
        let end = lex_error
            .as_ref()
            .map_or(source.len(), |(_, range)| range.start);

        let mut tokens: Vec<_> = raw
            .into_iter()
            .filter(|(token, _)| *token != Token::Newline)
            .map(|(token, range)| (token, base + range.start..base + range.end))
            .collect();
        tokens.push((Token::Eof, base + end..base + end));

        let mut nested = self.nested(tokens);
        let result = nested.parse_interpolation_tokens(source, base);

        let Some((kind, range)) = lex_error else {
            return result;
        };
        let error_offset = base + range.start;
        let tolerated = match &result {
            // A format specifier is raw text and may hold anything
            Ok(StringPart::Interpolation {
                format: Some(format),
                ..
            }) => range.start >= source.len() - format.len(),
            Ok(_) => false,
            Err(err) => err.position().offset < error_offset,
        };
        if tolerated {
            return result;
        }
        Err(ParseError::Lex {
            kind,
            position: self.location.byte_to_position(error_offset),
        })
    }

    /// `expression` or `expression:format` filling the whole token stream
    fn parse_interpolation_tokens(&mut self, source: &str, base: usize) -> Result<StringPart, ParseError> {
        let expression = self.parse_expression()?;

        let format = if self.check(&Token::Colon) {
            let colon = self.advance().1;
            let spec = source.get(colon.end - base..).unwrap_or_default();
            if spec.is_empty() {
                return Err(self.error_expected("format specifier", "string interpolation"));
            }
            Some(spec.to_string())
        } else if self.is_at_end() {
            None
        } else {
            return Err(self.error_expected("`}`", "string interpolation"));
        };

        Ok(StringPart::Interpolation { expression, format })
    }
}
