//! Parser module for rad scripts
//!
//! A hand-written recursive-descent parser over the token stream produced by
//! [`crate::rad::lexer`]. Statements are dispatched on their leading token,
//! expressions are parsed by precedence climbing, and the few places where the
//! grammar is ambiguous are settled by explicit lookahead (see
//! [`disambiguation`]).
//!
//! The parser fails fast: the first error aborts the parse.
//!
//! ## Testing
//!
//! Parser tests assert on the tree through the fluent API in
//! [`crate::rad::testing`], which ignores spans unless asked about them.

pub mod disambiguation;
pub mod domain;
pub mod expressions;
pub mod interpolation;
#[allow(clippy::module_inception)]
pub mod parser;
pub mod statements;
pub mod types;

use crate::rad::ast::{Expression, SourceFile, SourceLocation};
use crate::rad::error::ParseError;
use crate::rad::lexer::lex_with_options;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use parser::Parser;

/// Maximum nesting depth for expressions, blocks and interpolations before the
/// parser bails out instead of recursing further.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Columns a tab advances the indentation width by
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Options controlling lexing and parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub max_nesting_depth: usize,
    pub tab_width: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

/// Parse a rad script with default options
pub fn parse_source(source: &str) -> Result<SourceFile, ParseError> {
    parse_source_with_options(source, &ParseOptions::default())
}

/// Parse a rad script
pub fn parse_source_with_options(
    source: &str,
    options: &ParseOptions,
) -> Result<SourceFile, ParseError> {
    let tokens = lex_with_options(source, options)?;
    let location = SourceLocation::new(source);
    let mut parser = Parser::new(tokens, &location, options);

    let result = parser.parse_source_file();
    match &result {
        Ok(file) => debug!(statements = file.statements.len(), "parsed source file"),
        Err(err) => debug!(error = %err, "parse failed"),
    }
    result
}

/// Parse a single expression, optionally followed by one line break
pub fn parse_expression(source: &str) -> Result<Expression, ParseError> {
    let options = ParseOptions::default();
    let tokens = lex_with_options(source, &options)?;
    let location = SourceLocation::new(source);
    let mut parser = Parser::new(tokens, &location, &options);
    parser.parse_standalone_expression()
}

#[cfg(test)]
mod options_tests {
    use super::*;

    #[test]
    fn test_options_defaults_fill_missing_fields() {
        let options: ParseOptions = serde_yaml::from_str("tab_width: 8\n").unwrap();
        assert_eq!(
            options,
            ParseOptions {
                max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
                tab_width: 8,
            }
        );
    }

    #[test]
    fn test_options_from_json() {
        let options: ParseOptions = serde_json::from_str(r#"{"max_nesting_depth": 3}"#).unwrap();
        assert_eq!(options.max_nesting_depth, 3);
        assert_eq!(options.tab_width, DEFAULT_TAB_WIDTH);
    }
}
