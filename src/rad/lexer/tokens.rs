//! Token definitions for rad scripts
//!
//! The tokens are defined using the logos derive macro. Inline whitespace and
//! `//` comments are trivia and never become tokens. Physical line breaks are
//! kept as `Newline` so the indentation transform can turn them into logical
//! line ends.
//!
//! `Indent`, `Dedent` and `Eof` are never produced by logos; the indentation
//! transform synthesizes them.

use super::strings::{lex_string, StringToken};
use crate::rad::ast::QuoteKind;
use crate::rad::error::LexErrorKind;
use logos::{Lexer, Logos};
use serde::Serialize;
use std::fmt;

/// All possible tokens in a rad script
#[derive(Logos, Debug, PartialEq, Clone, Serialize)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\f\r]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    // Keywords
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("while")]
    While,
    #[token("fn")]
    Fn,
    #[token("args")]
    Args,
    #[token("return")]
    Return,
    #[token("yield")]
    Yield,
    #[token("pass")]
    Pass,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("del")]
    Del,
    #[token("catch")]
    Catch,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("defer")]
    Defer,
    #[token("errdefer")]
    Errdefer,
    #[token("rad")]
    Rad,
    #[token("request")]
    Request,
    #[token("display")]
    Display,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("not")]
    Not,
    #[token("and")]
    And,
    #[token("or")]
    Or,

    // Domain-block keywords, also usable as identifiers
    #[token("fields")]
    Fields,
    #[token("sort")]
    Sort,
    #[token("asc")]
    Asc,
    #[token("desc")]
    Desc,
    #[token("filter")]
    Filter,
    #[token("map")]
    Map,
    #[token("color")]
    Color,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    #[regex(r"[0-9](_?[0-9])*", parse_integer)]
    Integer(i64),

    #[regex(r"[0-9](_?[0-9])*\.[0-9](_?[0-9])*", parse_float)]
    Float(f64),

    #[token("\"", |lex| lex_string(lex, QuoteKind::Double))]
    #[token("'", |lex| lex_string(lex, QuoteKind::Single))]
    String(StringToken),

    // Operators
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    NotEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("%=")]
    PercentAssign,
    #[token("??")]
    QuestionQuestion,
    #[token("?")]
    Question,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("->")]
    Arrow,
    #[token("|")]
    Pipe,

    // Punctuation
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,

    // Line structure
    #[token("\n")]
    Newline,
    Indent,
    Dedent,
    Eof,
}

fn parse_integer(lex: &mut Lexer<'_, Token>) -> Result<i64, LexErrorKind> {
    lex.slice()
        .replace('_', "")
        .parse()
        .map_err(|_| LexErrorKind::InvalidNumber)
}

fn parse_float(lex: &mut Lexer<'_, Token>) -> Result<f64, LexErrorKind> {
    lex.slice()
        .replace('_', "")
        .parse()
        .map_err(|_| LexErrorKind::InvalidNumber)
}

impl Token {
    /// Identifier text for identifiers and the domain keywords that double as
    /// identifiers outside domain blocks
    pub fn identifier_name(&self) -> Option<&str> {
        match self {
            Token::Identifier(name) => Some(name),
            Token::Fields => Some("fields"),
            Token::Sort => Some("sort"),
            Token::Asc => Some("asc"),
            Token::Desc => Some("desc"),
            Token::Filter => Some("filter"),
            Token::Map => Some("map"),
            Token::Color => Some("color"),
            _ => None,
        }
    }

    /// Check if this token opens a bracket pair
    pub fn is_opening_bracket(&self) -> bool {
        matches!(self, Token::LeftParen | Token::LeftBracket | Token::LeftBrace)
    }

    /// Check if this token closes a bracket pair
    pub fn is_closing_bracket(&self) -> bool {
        matches!(
            self,
            Token::RightParen | Token::RightBracket | Token::RightBrace
        )
    }

    /// Check if this token is one of the synthetic line-structure tokens
    pub fn is_layout(&self) -> bool {
        matches!(
            self,
            Token::Newline | Token::Indent | Token::Dedent | Token::Eof
        )
    }

    /// Check if this token is an assignment operator
    pub fn is_assign_op(&self) -> bool {
        matches!(
            self,
            Token::Assign
                | Token::PlusAssign
                | Token::MinusAssign
                | Token::StarAssign
                | Token::SlashAssign
                | Token::PercentAssign
        )
    }

    fn fixed_text(&self) -> Option<&'static str> {
        Some(match self {
            Token::If => "if",
            Token::Else => "else",
            Token::For => "for",
            Token::In => "in",
            Token::While => "while",
            Token::Fn => "fn",
            Token::Args => "args",
            Token::Return => "return",
            Token::Yield => "yield",
            Token::Pass => "pass",
            Token::Break => "break",
            Token::Continue => "continue",
            Token::Del => "del",
            Token::Catch => "catch",
            Token::Switch => "switch",
            Token::Case => "case",
            Token::Default => "default",
            Token::Defer => "defer",
            Token::Errdefer => "errdefer",
            Token::Rad => "rad",
            Token::Request => "request",
            Token::Display => "display",
            Token::True => "true",
            Token::False => "false",
            Token::Null => "null",
            Token::Not => "not",
            Token::And => "and",
            Token::Or => "or",
            Token::Fields => "fields",
            Token::Sort => "sort",
            Token::Asc => "asc",
            Token::Desc => "desc",
            Token::Filter => "filter",
            Token::Map => "map",
            Token::Color => "color",
            Token::EqualEqual => "==",
            Token::NotEqual => "!=",
            Token::LessEqual => "<=",
            Token::GreaterEqual => ">=",
            Token::Less => "<",
            Token::Greater => ">",
            Token::Assign => "=",
            Token::PlusAssign => "+=",
            Token::MinusAssign => "-=",
            Token::StarAssign => "*=",
            Token::SlashAssign => "/=",
            Token::PercentAssign => "%=",
            Token::QuestionQuestion => "??",
            Token::Question => "?",
            Token::PlusPlus => "++",
            Token::MinusMinus => "--",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Arrow => "->",
            Token::Pipe => "|",
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::LeftBracket => "[",
            Token::RightBracket => "]",
            Token::LeftBrace => "{",
            Token::RightBrace => "}",
            Token::Comma => ",",
            Token::Dot => ".",
            Token::Colon => ":",
            _ => return None,
        })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "identifier `{name}`"),
            Token::Integer(value) => write!(f, "integer `{value}`"),
            Token::Float(value) => write!(f, "float `{value}`"),
            Token::String(_) => write!(f, "string literal"),
            Token::Newline => write!(f, "newline"),
            Token::Indent => write!(f, "indent"),
            Token::Dedent => write!(f, "dedent"),
            Token::Eof => write!(f, "end of input"),
            other => match other.fixed_text() {
                Some(text) => write!(f, "`{text}`"),
                None => write!(f, "{other:?}"),
            },
        }
    }
}
