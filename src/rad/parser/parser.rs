//! Parser state and token management
//!
//! The [`Parser`] owns the processed token stream and a cursor into it. The
//! grammar productions live in the sibling modules as further `impl Parser`
//! blocks; this module only has the plumbing they share: peeking, consuming,
//! reporting errors, computing spans and guarding recursion depth.

use super::ParseOptions;
use crate::rad::ast::{Position, SourceFile, SourceLocation, Span};
use crate::rad::error::{IndentationErrorKind, ParseError, SyntaxErrorKind};
use crate::rad::lexer::{Token, TokenSpan};
use std::mem::discriminant;
use std::ops::Range;

static EOF: Token = Token::Eof;

/// The parser state.
pub struct Parser<'a> {
    tokens: Vec<TokenSpan>,
    current: usize,
    /// End offset of the last consumed token that is not a layout token
    last_end: usize,
    pub(super) location: &'a SourceLocation<'a>,
    pub(super) options: &'a ParseOptions,
    nesting_depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser over processed tokens. An `Eof` token is appended if
    /// the stream does not already end with one.
    pub fn new(
        mut tokens: Vec<TokenSpan>,
        location: &'a SourceLocation<'a>,
        options: &'a ParseOptions,
    ) -> Self {
        if !matches!(tokens.last(), Some((Token::Eof, _))) {
            let end = tokens.last().map_or(0, |(_, range)| range.end);
            tokens.push((Token::Eof, end..end));
        }
        let last_end = tokens.first().map_or(0, |(_, range)| range.start);
        Self {
            tokens,
            current: 0,
            last_end,
            location,
            options,
            nesting_depth: 0,
        }
    }

    /// A parser for an embedded token stream that shares this parser's
    /// source, options and current nesting depth.
    pub(super) fn nested(&self, tokens: Vec<TokenSpan>) -> Parser<'a> {
        let mut parser = Parser::new(tokens, self.location, self.options);
        parser.nesting_depth = self.nesting_depth;
        parser
    }

    /// Parses a whole file: statements until end of input.
    pub fn parse_source_file(&mut self) -> Result<SourceFile, ParseError> {
        let mut statements = Vec::new();
        loop {
            match self.current() {
                Token::Eof => break,
                Token::Indent => return Err(self.unexpected_indent()),
                _ => statements.push(self.parse_statement()?),
            }
        }
        Ok(SourceFile { statements })
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Returns the current token.
    pub(super) fn current(&self) -> &Token {
        self.peek_at(0)
    }

    /// Peeks `offset` tokens ahead. Past the end this is always `Eof`.
    pub(super) fn peek_at(&self, offset: usize) -> &Token {
        self.tokens
            .get(self.current + offset)
            .map_or(&EOF, |(token, _)| token)
    }

    /// Byte range of the current token
    pub(super) fn current_range(&self) -> Range<usize> {
        self.tokens
            .get(self.current)
            .or(self.tokens.last())
            .map_or(0..0, |(_, range)| range.clone())
    }

    /// Byte offset where the current token starts
    pub(super) fn current_start(&self) -> usize {
        self.current_range().start
    }

    pub(super) fn current_position(&self) -> Position {
        self.location.byte_to_position(self.current_start())
    }

    /// Checks if we're at the end of input.
    pub(super) fn is_at_end(&self) -> bool {
        matches!(self.current(), Token::Eof)
    }

    /// Advances to the next token and returns the consumed one.
    pub(super) fn advance(&mut self) -> TokenSpan {
        let consumed = self
            .tokens
            .get(self.current)
            .cloned()
            .unwrap_or((Token::Eof, self.last_end..self.last_end));
        if !self.is_at_end() {
            self.current += 1;
        }
        if !consumed.0.is_layout() {
            self.last_end = consumed.1.end;
        }
        consumed
    }

    /// Checks if the current token is of the same kind as `token`. Payloads
    /// are not compared.
    pub(super) fn check(&self, token: &Token) -> bool {
        discriminant(self.current()) == discriminant(token)
    }

    /// Consumes the current token if it matches the given kind.
    pub(super) fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to match the given kind, advancing if it does.
    pub(super) fn expect(
        &mut self,
        token: &Token,
        production: &'static str,
    ) -> Result<Range<usize>, ParseError> {
        if self.check(token) {
            Ok(self.advance().1)
        } else {
            Err(self.error_expected(token.to_string(), production))
        }
    }

    /// Expects an identifier, accepting the soft domain keywords as names.
    pub(super) fn expect_identifier(
        &mut self,
        production: &'static str,
    ) -> Result<String, ParseError> {
        match self.current().identifier_name() {
            Some(name) => {
                let name = name.to_string();
                self.advance();
                Ok(name)
            }
            None => Err(self.error_expected("identifier", production)),
        }
    }

    /// Expects the end of a logical line.
    pub(super) fn expect_newline(&mut self, production: &'static str) -> Result<(), ParseError> {
        self.expect(&Token::Newline, production).map(|_| ())
    }

    /// Expects `INDENT` opening an indented body.
    pub(super) fn expect_indent(&mut self, production: &'static str) -> Result<(), ParseError> {
        self.expect(&Token::Indent, production)
            .map(|_| ())
            .map_err(|_| self.error_expected("an indented block", production))
    }

    // ========================================================================
    // Spans
    // ========================================================================

    /// Span from byte offset `start` to the end of the last consumed token.
    pub(super) fn span_from(&self, start: usize) -> Span {
        let end = self.last_end.max(start);
        self.location.range_to_span(&(start..end))
    }

    // ========================================================================
    // Errors
    // ========================================================================

    pub(super) fn syntax_error(&self, kind: SyntaxErrorKind, production: &'static str) -> ParseError {
        ParseError::Syntax {
            kind,
            production,
            position: self.current_position(),
        }
    }

    /// "expected X, found <current token>"
    pub(super) fn error_expected(
        &self,
        expected: impl Into<String>,
        production: &'static str,
    ) -> ParseError {
        self.syntax_error(
            SyntaxErrorKind::Expected {
                expected: expected.into(),
                found: self.current().to_string(),
            },
            production,
        )
    }

    /// An indented line where no block was opened
    pub(super) fn unexpected_indent(&self) -> ParseError {
        ParseError::Indentation {
            kind: IndentationErrorKind::UnexpectedIndent,
            position: self.current_position(),
        }
    }

    // ========================================================================
    // Nesting guard
    // ========================================================================

    /// Increments the nesting depth and fails if it exceeds the configured
    /// maximum. Pair every successful call with [`Parser::leave_nesting`].
    pub(super) fn enter_nesting(&mut self, production: &'static str) -> Result<(), ParseError> {
        let limit = self.options.max_nesting_depth;
        if self.nesting_depth >= limit {
            return Err(self.syntax_error(SyntaxErrorKind::NestingTooDeep(limit), production));
        }
        self.nesting_depth += 1;
        Ok(())
    }

    /// Decrements the nesting depth (pair with [`Parser::enter_nesting`]).
    pub(super) fn leave_nesting(&mut self) {
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }

    /// Runs `parse` one nesting level deeper.
    pub(super) fn nested_parse<T>(
        &mut self,
        production: &'static str,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.enter_nesting(production)?;
        let result = parse(self);
        self.leave_nesting();
        result
    }

    /// Runs a left-associative chain loop. Each link wraps the tree built so
    /// far one level deeper, so `parse` calls `enter_nesting` per link and
    /// counts it in `links`; all links are released when the chain ends.
    pub(super) fn chained_parse<T>(
        &mut self,
        parse: impl FnOnce(&mut Self, &mut usize) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let mut links = 0;
        let result = parse(self, &mut links);
        self.nesting_depth = self.nesting_depth.saturating_sub(links);
        result
    }
}
