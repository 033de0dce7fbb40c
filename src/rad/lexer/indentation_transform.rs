//! Indentation transformation for the rad lexer
//!
//! Turns the raw token stream (physical `Newline`s, no layout information)
//! into the stream the parser consumes:
//!
//! - `Newline` ends each logical line that had content. Blank and
//!   comment-only lines produce nothing.
//! - `Indent`/`Dedent` appear before the first token of a line whose
//!   indentation width differs from the enclosing block's.
//! - Inside `()`, `[]` and `{}` line breaks are absorbed, so a bracketed
//!   expression may span lines with any indentation.
//! - The stream always ends with the dedents that close every open block,
//!   followed by a single `Eof`.
//!
//! Indentation width counts a space as one column and a tab as `tab_width`
//! columns. A single line may not mix the two.
//!
//! Synthetic tokens get empty spans positioned where they take effect.

use super::tokens::Token;
use super::TokenSpan;
use crate::rad::ast::SourceLocation;
use crate::rad::error::{IndentationErrorKind, LexErrorKind, ParseError};
use std::cmp::Ordering;
use std::ops::Range;
use tracing::trace;

/// Transform raw tokens into logical lines with `Indent`/`Dedent` tokens
///
/// # Example
///
/// Source `if x:\n    pass\n` tokenizes to
/// `[If, Identifier, Colon, Newline, Pass, Newline]` and transforms to
/// `[If, Identifier, Colon, Newline, Indent, Pass, Newline, Dedent, Eof]`.
pub fn transform_indentation(
    source: &str,
    tokens: Vec<TokenSpan>,
    tab_width: usize,
) -> Result<Vec<TokenSpan>, ParseError> {
    let mut result = Vec::with_capacity(tokens.len() + 8);
    let mut levels: Vec<usize> = vec![0];
    let mut brackets: Vec<(char, usize)> = Vec::new();
    let mut line_has_content = false;

    for (token, range) in tokens {
        if token == Token::Newline {
            if brackets.is_empty() && line_has_content {
                result.push((Token::Newline, range));
                line_has_content = false;
            }
            continue;
        }

        if !line_has_content {
            let width = measure_indentation(source, range.start, tab_width)?;
            adjust_levels(source, &mut levels, width, range.start, &mut result)?;
            line_has_content = true;
        }

        if let Some(opener) = opening_char(&token) {
            brackets.push((opener, range.start));
        } else if token.is_closing_bracket() {
            brackets.pop();
        }

        result.push((token, range));
    }

    if let Some(&(opener, offset)) = brackets.last() {
        return Err(ParseError::Lex {
            kind: LexErrorKind::UnclosedBracket(opener),
            position: SourceLocation::new(source).byte_to_position(offset),
        });
    }

    let end = source.len();
    if line_has_content {
        result.push((Token::Newline, synthetic(end)));
    }
    while levels.len() > 1 {
        levels.pop();
        trace!(depth = levels.len(), "closing block at end of input");
        result.push((Token::Dedent, synthetic(end)));
    }
    result.push((Token::Eof, synthetic(end)));

    Ok(result)
}

fn adjust_levels(
    source: &str,
    levels: &mut Vec<usize>,
    width: usize,
    offset: usize,
    result: &mut Vec<TokenSpan>,
) -> Result<(), ParseError> {
    let current = levels.last().copied().unwrap_or(0);
    match width.cmp(&current) {
        Ordering::Greater => {
            levels.push(width);
            trace!(width, depth = levels.len() - 1, "indent");
            result.push((Token::Indent, synthetic(offset)));
        }
        Ordering::Less => {
            while levels.last().is_some_and(|&top| top > width) {
                levels.pop();
                trace!(width, depth = levels.len() - 1, "dedent");
                result.push((Token::Dedent, synthetic(offset)));
            }
            if levels.last() != Some(&width) {
                return Err(ParseError::Indentation {
                    kind: IndentationErrorKind::InconsistentDedent { width },
                    position: SourceLocation::new(source).byte_to_position(offset),
                });
            }
        }
        Ordering::Equal => {}
    }
    Ok(())
}

/// Width of the whitespace between the start of the line and `offset`
fn measure_indentation(source: &str, offset: usize, tab_width: usize) -> Result<usize, ParseError> {
    let line_start = source[..offset].rfind('\n').map_or(0, |newline| newline + 1);
    let prefix = &source[line_start..offset];

    let spaces = prefix.chars().filter(|&c| c == ' ').count();
    let tabs = prefix.chars().filter(|&c| c == '\t').count();
    if spaces > 0 && tabs > 0 {
        return Err(ParseError::Indentation {
            kind: IndentationErrorKind::MixedTabsAndSpaces,
            position: SourceLocation::new(source).byte_to_position(line_start),
        });
    }

    Ok(spaces + tabs * tab_width)
}

fn opening_char(token: &Token) -> Option<char> {
    match token {
        Token::LeftParen => Some('('),
        Token::LeftBracket => Some('['),
        Token::LeftBrace => Some('{'),
        _ => None,
    }
}

fn synthetic(offset: usize) -> Range<usize> {
    offset..offset
}
