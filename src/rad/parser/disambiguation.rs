//! Context rules for the grammar's ambiguous positions
//!
//! An identifier at the start of a statement may begin an assignment or an
//! expression statement, and only certain expressions may be assigned to.
//! Both questions are settled here by explicit lookahead instead of by
//! backtracking:
//!
//! 1. If the statement starts with an `ident(.ident | [...])*` chain that is
//!    directly followed by an assignment operator, it is an assignment.
//! 2. Otherwise it is parsed as an expression. An assignment operator after
//!    it is accepted only when the expression is an identifier, subscript
//!    or attribute; anything else is an invalid assignment target.
//!
//! The third ambiguous position, the names between `for` and `in`, never
//! reaches the expression parser at all (see `Parser::parse_pattern`).

use super::parser::Parser;
use crate::rad::ast::{
    AssignOp, Assignment, Expression, ExpressionKind, ExpressionStatement, Statement,
    StatementKind,
};
use crate::rad::error::{ParseError, SyntaxErrorKind};
use crate::rad::lexer::Token;

fn assign_op(token: &Token) -> Option<AssignOp> {
    Some(match token {
        Token::Assign => AssignOp::Assign,
        Token::PlusAssign => AssignOp::AddAssign,
        Token::MinusAssign => AssignOp::SubtractAssign,
        Token::StarAssign => AssignOp::MultiplyAssign,
        Token::SlashAssign => AssignOp::DivideAssign,
        Token::PercentAssign => AssignOp::ModuloAssign,
        _ => return None,
    })
}

/// How an invalid assignment target is named in errors
fn describe_target(expression: &Expression) -> &'static str {
    match &expression.kind {
        ExpressionKind::Identifier(_) => "identifier",
        ExpressionKind::Integer(_) | ExpressionKind::Float(_) => "number literal",
        ExpressionKind::String(_) => "string literal",
        ExpressionKind::Boolean(_) => "boolean literal",
        ExpressionKind::Null => "null",
        ExpressionKind::List(_) => "list literal",
        ExpressionKind::Map(_) => "map literal",
        ExpressionKind::Parenthesized(_) => "parenthesized expression",
        ExpressionKind::Binary { .. } => "binary expression",
        ExpressionKind::Unary { .. } => "unary expression",
        ExpressionKind::Ternary { .. } => "ternary expression",
        ExpressionKind::Call { .. } => "function call",
        ExpressionKind::Subscript { .. } => "subscript",
        ExpressionKind::Attribute { .. } => "attribute",
        ExpressionKind::ListComprehension { .. } => "list comprehension",
        ExpressionKind::AnonymousFunction { .. } => "anonymous function",
    }
}

impl Parser<'_> {
    /// Whether the tokens at the cursor form an identifier chain followed by
    /// an assignment operator. Looks ahead without consuming anything.
    pub(super) fn lookahead_assignment_target(&self) -> bool {
        if self.current().identifier_name().is_none() {
            return false;
        }

        let mut offset = 1;
        loop {
            match self.peek_at(offset) {
                Token::Dot if self.peek_at(offset + 1).identifier_name().is_some() => offset += 2,
                Token::LeftBracket => match self.skip_brackets(offset) {
                    Some(next) => offset = next,
                    None => return false,
                },
                token => return token.is_assign_op(),
            }
        }
    }

    /// Offset just past the bracket group opening at `offset`, if it closes
    fn skip_brackets(&self, offset: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut offset = offset;
        loop {
            let token = self.peek_at(offset);
            if token.is_opening_bracket() {
                depth += 1;
            } else if token.is_closing_bracket() {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(offset + 1);
                }
            } else if token.is_layout() {
                return None;
            }
            offset += 1;
        }
    }

    /// Assignment or expression statement, with an optional `catch:` block
    pub(super) fn parse_assignment_or_expression(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_start();

        let expression = if self.lookahead_assignment_target() {
            self.parse_postfix()?
        } else {
            self.parse_expression()?
        };

        let kind = match assign_op(self.current()) {
            Some(operator) => {
                if !expression.is_assignable() {
                    return Err(ParseError::Syntax {
                        kind: SyntaxErrorKind::InvalidAssignmentTarget(
                            describe_target(&expression).to_string(),
                        ),
                        production: "assignment",
                        position: expression.span.start,
                    });
                }
                self.advance();
                let value = self.parse_expression()?;
                let catch = self.parse_catch_or_newline("assignment")?;
                StatementKind::Assignment(Assignment {
                    target: expression,
                    operator,
                    value,
                    catch,
                })
            }
            None => {
                let catch = self.parse_catch_or_newline("expression statement")?;
                StatementKind::Expression(ExpressionStatement { expression, catch })
            }
        };

        Ok(Statement::new(kind, self.span_from(start)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rad::ast::SourceLocation;
    use crate::rad::lexer::lex;
    use crate::rad::parser::ParseOptions;

    fn looks_like_assignment(source: &str) -> bool {
        let tokens = lex(source).unwrap();
        let location = SourceLocation::new(source);
        let options = ParseOptions::default();
        let parser = Parser::new(tokens, &location, &options);
        parser.lookahead_assignment_target()
    }

    #[test]
    fn test_lookahead_finds_assignments() {
        assert!(looks_like_assignment("x = 1\n"));
        assert!(looks_like_assignment("x += 1\n"));
        assert!(looks_like_assignment("a.b.c = 1\n"));
        assert!(looks_like_assignment("a[f(1)][\"k\"].c %= 2\n"));
        assert!(looks_like_assignment("map = {}\n"));
    }

    #[test]
    fn test_lookahead_rejects_expressions() {
        assert!(!looks_like_assignment("x == 1\n"));
        assert!(!looks_like_assignment("f(x)\n"));
        assert!(!looks_like_assignment("f().x = 1\n"));
        assert!(!looks_like_assignment("[a] = 1\n"));
        assert!(!looks_like_assignment("x\n"));
    }
}
