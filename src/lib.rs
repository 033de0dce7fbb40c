//! # rad-syntax
//!
//! Lexer and parser for the rad scripting language.
//!
//! Source text goes through a logos tokenizer, an indentation transform that
//! produces `Newline`/`Indent`/`Dedent` tokens, and a recursive-descent parser
//! that builds a [`rad::ast::SourceFile`].
//!
//! ## Testing
//!
//! For AST assertions used across the test suite, see the
//! [testing module](rad::testing).

pub mod rad;

pub use rad::ast::SourceFile;
pub use rad::error::ParseError;
pub use rad::parser::{parse_source, parse_source_with_options, ParseOptions};
