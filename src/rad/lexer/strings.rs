//! String literal scanning
//!
//! String tokens are matched in two passes:
//!
//! 1. While tokenizing, the logos callback finds where the literal ends. It
//!    validates escapes and skips over `{...}` interpolations, balancing
//!    braces and stepping over nested string literals so that a `}` or a
//!    quote inside an embedded expression does not end anything early.
//! 2. When the parser reaches the token, [`split_string_body`] cuts the raw
//!    body into decoded text runs and interpolation sources. The parser then
//!    lexes and parses each interpolation with the full expression grammar.
//!
//! Only triple-quoted strings may contain raw line breaks.

use super::tokens::Token;
use crate::rad::ast::QuoteKind;
use crate::rad::error::LexErrorKind;
use logos::Lexer;
use serde::Serialize;

/// Strings nested inside interpolations deeper than this are rejected
const MAX_STRING_NESTING: usize = 32;

/// A string literal as it comes out of the tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringToken {
    pub quote: QuoteKind,
    /// Raw text between the delimiters, escapes and interpolations untouched
    pub body: String,
}

/// A piece of a string body, before interpolations are parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawStringPart<'a> {
    /// Literal text with escapes decoded
    Text(String),
    /// Source between `{` and the matching `}`; `offset` is the byte offset
    /// of `source` within the body
    Interpolation { offset: usize, source: &'a str },
}

/// logos callback for an opening quote
pub(crate) fn lex_string(
    lex: &mut Lexer<'_, Token>,
    quote: QuoteKind,
) -> Result<StringToken, LexErrorKind> {
    let remainder = lex.remainder();
    let (quote, opener_rest) = if quote == QuoteKind::Double && remainder.starts_with("\"\"") {
        (QuoteKind::Triple, 2)
    } else {
        (quote, 0)
    };

    let rest = &remainder[opener_rest..];
    let body_len = scan_string_body(rest, quote, 0)?;
    let body = rest[..body_len].to_string();
    lex.bump(opener_rest + body_len + quote.delimiter().len());

    Ok(StringToken { quote, body })
}

/// Length in bytes of the string body at the start of `text`, not counting
/// the closing delimiter
fn scan_string_body(text: &str, quote: QuoteKind, nesting: usize) -> Result<usize, LexErrorKind> {
    let delimiter = quote.delimiter();
    let mut pos = 0;

    while let Some(c) = text[pos..].chars().next() {
        if text[pos..].starts_with(delimiter) {
            return Ok(pos);
        }
        match c {
            '\\' => {
                let escaped = text[pos + 1..]
                    .chars()
                    .next()
                    .ok_or(LexErrorKind::UnterminatedString)?;
                decode_escape(escaped)?;
                pos += 1 + escaped.len_utf8();
            }
            '\n' if !quote.allows_newlines() => return Err(LexErrorKind::UnterminatedString),
            '{' => pos += interpolation_len(&text[pos..], quote.allows_newlines(), nesting)?,
            _ => pos += c.len_utf8(),
        }
    }

    Err(LexErrorKind::UnterminatedString)
}

/// Length in bytes of the interpolation at the start of `text` (which begins
/// with `{`), including both braces
///
/// A `:` outside any bracket that does not close a ternary starts the format
/// specifier, which runs raw up to the next `}`.
fn interpolation_len(text: &str, multiline: bool, nesting: usize) -> Result<usize, LexErrorKind> {
    let mut depth = 0usize;
    let mut brackets = 0usize;
    let mut open_ternaries = 0usize;
    let mut pos = 0;

    while let Some(c) = text[pos..].chars().next() {
        let top_level = depth == 1 && brackets == 0;
        match c {
            '{' => {
                depth += 1;
                pos += 1;
            }
            '}' => {
                depth -= 1;
                pos += 1;
                if depth == 0 {
                    return Ok(pos);
                }
            }
            '(' | '[' => {
                brackets += 1;
                pos += 1;
            }
            ')' | ']' => {
                brackets = brackets.saturating_sub(1);
                pos += 1;
            }
            '?' if text[pos..].starts_with("??") => pos += 2,
            '?' => {
                if top_level {
                    open_ternaries += 1;
                }
                pos += 1;
            }
            ':' if top_level && open_ternaries == 0 => {
                return format_spec_end(text, pos + 1, multiline);
            }
            ':' => {
                if top_level {
                    open_ternaries -= 1;
                }
                pos += 1;
            }
            '"' | '\'' => {
                if nesting >= MAX_STRING_NESTING {
                    return Err(LexErrorKind::InterpolationTooDeep);
                }
                let (quote, open_len) = if text[pos..].starts_with("\"\"\"") {
                    (QuoteKind::Triple, 3)
                } else if c == '"' {
                    (QuoteKind::Double, 1)
                } else {
                    (QuoteKind::Single, 1)
                };
                let body = scan_string_body(&text[pos + open_len..], quote, nesting + 1)?;
                pos += open_len + body + quote.delimiter().len();
            }
            '\n' if !multiline => return Err(LexErrorKind::UnbalancedInterpolation),
            _ => pos += c.len_utf8(),
        }
    }

    Err(LexErrorKind::UnbalancedInterpolation)
}

/// Offset just past the `}` ending a format specifier that starts at `start`
fn format_spec_end(text: &str, start: usize, multiline: bool) -> Result<usize, LexErrorKind> {
    for (offset, c) in text[start..].char_indices() {
        match c {
            '}' => return Ok(start + offset + 1),
            '\n' if !multiline => break,
            _ => {}
        }
    }
    Err(LexErrorKind::UnbalancedInterpolation)
}

fn decode_escape(escaped: char) -> Result<char, LexErrorKind> {
    match escaped {
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        't' => Ok('\t'),
        '"' | '\'' | '\\' | '{' => Ok(escaped),
        other => Err(LexErrorKind::InvalidEscape(other)),
    }
}

/// Split a raw string body into decoded text runs and interpolation sources,
/// in source order. Adjacent text and escapes merge into one run.
pub fn split_string_body(body: &str, quote: QuoteKind) -> Result<Vec<RawStringPart<'_>>, LexErrorKind> {
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut pos = 0;

    while let Some(c) = body[pos..].chars().next() {
        match c {
            '\\' => {
                let escaped = body[pos + 1..]
                    .chars()
                    .next()
                    .ok_or(LexErrorKind::UnterminatedString)?;
                text.push(decode_escape(escaped)?);
                pos += 1 + escaped.len_utf8();
            }
            '{' => {
                let len = interpolation_len(&body[pos..], quote.allows_newlines(), 0)?;
                if !text.is_empty() {
                    parts.push(RawStringPart::Text(std::mem::take(&mut text)));
                }
                parts.push(RawStringPart::Interpolation {
                    offset: pos + 1,
                    source: &body[pos + 1..pos + len - 1],
                });
                pos += len;
            }
            _ => {
                text.push(c);
                pos += c.len_utf8();
            }
        }
    }

    if !text.is_empty() {
        parts.push(RawStringPart::Text(text));
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos::Logos;

    fn lex_one(source: &str) -> Option<Result<Token, LexErrorKind>> {
        Token::lexer(source).next()
    }

    fn string(quote: QuoteKind, body: &str) -> Token {
        Token::String(StringToken {
            quote,
            body: body.to_string(),
        })
    }

    #[test]
    fn test_quote_styles() {
        assert_eq!(lex_one("\"hi\""), Some(Ok(string(QuoteKind::Double, "hi"))));
        assert_eq!(lex_one("'hi'"), Some(Ok(string(QuoteKind::Single, "hi"))));
        assert_eq!(
            lex_one("\"\"\"a\nb\"\"\""),
            Some(Ok(string(QuoteKind::Triple, "a\nb")))
        );
        assert_eq!(lex_one("\"\""), Some(Ok(string(QuoteKind::Double, ""))));
    }

    #[test]
    fn test_string_token_span_covers_delimiters() {
        let mut lexer = Token::lexer("x = 'ab' + 1");
        let mut spans = Vec::new();
        while let Some(result) = lexer.next() {
            if let Ok(Token::String(_)) = result {
                spans.push(lexer.span());
            }
        }
        assert_eq!(spans, vec![4..8]);
    }

    #[test]
    fn test_interpolation_with_nested_string_and_braces() {
        let source = r#""a {m["}"]} {  {k: 1}["k"] } b""#;
        assert_eq!(
            lex_one(source),
            Some(Ok(string(
                QuoteKind::Double,
                r#"a {m["}"]} {  {k: 1}["k"] } b"#
            )))
        );
    }

    #[test]
    fn test_format_specifier_is_raw_text() {
        assert_eq!(
            lex_one("\"{name:'>10} and {x:\"}\""),
            Some(Ok(string(QuoteKind::Double, "{name:'>10} and {x:\"}")))
        );
        let parts = split_string_body("{name:'>10}", QuoteKind::Double).unwrap();
        assert_eq!(
            parts,
            vec![RawStringPart::Interpolation {
                offset: 1,
                source: "name:'>10"
            }]
        );
    }

    #[test]
    fn test_ternary_and_slice_colons_are_not_format_specifiers() {
        let body = r#"{ok ? "}" : xs[1:2]:>4}"#;
        assert_eq!(
            split_string_body(body, QuoteKind::Single).unwrap(),
            vec![RawStringPart::Interpolation {
                offset: 1,
                source: r#"ok ? "}" : xs[1:2]:>4"#
            }]
        );
    }

    #[test]
    fn test_unterminated_strings() {
        assert_eq!(lex_one("\"abc"), Some(Err(LexErrorKind::UnterminatedString)));
        assert_eq!(
            lex_one("'abc\n'"),
            Some(Err(LexErrorKind::UnterminatedString))
        );
    }

    #[test]
    fn test_invalid_escape() {
        assert_eq!(lex_one(r#""a\qb""#), Some(Err(LexErrorKind::InvalidEscape('q'))));
    }

    #[test]
    fn test_unbalanced_interpolation() {
        assert_eq!(
            lex_one("\"total {count\n\""),
            Some(Err(LexErrorKind::UnbalancedInterpolation))
        );
    }

    #[test]
    fn test_split_decodes_escapes_and_keeps_order() {
        let parts = split_string_body(r"x\t\{y} {name:>10}!", QuoteKind::Double).unwrap();
        assert_eq!(
            parts,
            vec![
                RawStringPart::Text("x\t{y} ".to_string()),
                RawStringPart::Interpolation {
                    offset: 10,
                    source: "name:>10"
                },
                RawStringPart::Text("!".to_string()),
            ]
        );
    }

    #[test]
    fn test_split_adjacent_interpolations() {
        let parts = split_string_body("{a}{b}", QuoteKind::Single).unwrap();
        assert_eq!(
            parts,
            vec![
                RawStringPart::Interpolation {
                    offset: 1,
                    source: "a"
                },
                RawStringPart::Interpolation {
                    offset: 4,
                    source: "b"
                },
            ]
        );
    }
}
