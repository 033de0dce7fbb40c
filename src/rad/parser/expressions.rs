//! Expression parsing
//!
//! Precedence climbing over the binary levels, with dedicated functions for
//! the prefix, increment and postfix levels. From loosest to tightest:
//!
//! | level | operators                         | associativity |
//! |-------|-----------------------------------|---------------|
//! | 0     | `c ? a : b`                       | right         |
//! | 1     | `or`                              | left          |
//! | 2     | `and`                             | left          |
//! | 3     | `==` `!=` `<` `>` `<=` `>=`       | left          |
//! | 4     | `??`                              | left          |
//! | 5     | `+` `-`                           | left          |
//! | 6     | `*` `/` `%`                       | left          |
//! | 7     | `in` `not in`                     | left          |
//! | 8     | prefix `not` `-`                  |               |
//! | 9     | `++` `--` (prefix and postfix)    |               |
//! | 10    | call, subscript, attribute        | left          |

use super::parser::Parser;
use crate::rad::ast::{
    Argument, BinaryOp, Expression, ExpressionKind, Fixity, MapEntry, MapKey, SubscriptIndex,
    UnaryOp,
};
use crate::rad::error::{ParseError, SyntaxErrorKind};
use crate::rad::lexer::Token;

/// Binary precedence levels, loosest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Or,
    And,
    Comparison,
    Coalesce,
    Additive,
    Multiplicative,
}

impl Precedence {
    /// The next tighter binary level, or `None` when membership comes next
    fn tighter(self) -> Option<Self> {
        match self {
            Precedence::Or => Some(Precedence::And),
            Precedence::And => Some(Precedence::Comparison),
            Precedence::Comparison => Some(Precedence::Coalesce),
            Precedence::Coalesce => Some(Precedence::Additive),
            Precedence::Additive => Some(Precedence::Multiplicative),
            Precedence::Multiplicative => None,
        }
    }

    fn operator(self, token: &Token) -> Option<BinaryOp> {
        let op = match (self, token) {
            (Precedence::Or, Token::Or) => BinaryOp::Or,
            (Precedence::And, Token::And) => BinaryOp::And,
            (Precedence::Comparison, Token::EqualEqual) => BinaryOp::Equal,
            (Precedence::Comparison, Token::NotEqual) => BinaryOp::NotEqual,
            (Precedence::Comparison, Token::Less) => BinaryOp::Less,
            (Precedence::Comparison, Token::Greater) => BinaryOp::Greater,
            (Precedence::Comparison, Token::LessEqual) => BinaryOp::LessEqual,
            (Precedence::Comparison, Token::GreaterEqual) => BinaryOp::GreaterEqual,
            (Precedence::Coalesce, Token::QuestionQuestion) => BinaryOp::NullCoalesce,
            (Precedence::Additive, Token::Plus) => BinaryOp::Add,
            (Precedence::Additive, Token::Minus) => BinaryOp::Subtract,
            (Precedence::Multiplicative, Token::Star) => BinaryOp::Multiply,
            (Precedence::Multiplicative, Token::Slash) => BinaryOp::Divide,
            (Precedence::Multiplicative, Token::Percent) => BinaryOp::Modulo,
            _ => return None,
        };
        Some(op)
    }
}

fn binary(op: BinaryOp, left: Expression, right: Expression) -> Expression {
    let span = left.span.merge(right.span);
    Expression::new(
        ExpressionKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

impl Parser<'_> {
    // ========================================================================
    // Expression Parsing
    // ========================================================================

    /// Parses any expression.
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.nested_parse("expression", Self::parse_ternary)
    }

    /// An expression that must make up the whole input, as used by
    /// [`crate::rad::parser::parse_expression`].
    pub(crate) fn parse_standalone_expression(&mut self) -> Result<Expression, ParseError> {
        let expression = self.parse_expression()?;
        self.match_token(&Token::Newline);
        if !self.is_at_end() {
            return Err(self.error_expected("end of input", "expression"));
        }
        Ok(expression)
    }

    /// `condition ? then : else`, right-associative
    fn parse_ternary(&mut self) -> Result<Expression, ParseError> {
        let start = self.current_start();
        let condition = self.parse_binary(Precedence::Or)?;
        if !self.match_token(&Token::Question) {
            return Ok(condition);
        }

        let then_branch = self.parse_expression()?;
        self.expect(&Token::Colon, "ternary expression")?;
        let else_branch = self.parse_expression()?;
        Ok(Expression::new(
            ExpressionKind::Ternary {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            self.span_from(start),
        ))
    }

    fn parse_binary(&mut self, precedence: Precedence) -> Result<Expression, ParseError> {
        self.chained_parse(|parser, links| {
            let mut left = parser.parse_binary_operand(precedence)?;
            while let Some(op) = precedence.operator(parser.current()) {
                parser.enter_nesting("binary expression")?;
                *links += 1;
                parser.advance();
                let right = parser.parse_binary_operand(precedence)?;
                left = binary(op, left, right);
            }
            Ok(left)
        })
    }

    fn parse_binary_operand(&mut self, precedence: Precedence) -> Result<Expression, ParseError> {
        match precedence.tighter() {
            Some(tighter) => self.parse_binary(tighter),
            None => self.parse_membership(),
        }
    }

    /// `a in b`, `a not in b`
    fn parse_membership(&mut self) -> Result<Expression, ParseError> {
        self.chained_parse(|parser, links| {
            let mut left = parser.parse_unary()?;
            loop {
                let op = match (parser.current(), parser.peek_at(1)) {
                    (Token::In, _) => BinaryOp::In,
                    (Token::Not, Token::In) => BinaryOp::NotIn,
                    _ => break,
                };
                parser.enter_nesting("membership test")?;
                *links += 1;
                if op == BinaryOp::NotIn {
                    parser.advance();
                }
                parser.advance();
                let right = parser.parse_unary()?;
                left = binary(op, left, right);
            }
            Ok(left)
        })
    }

    /// Prefix `not` and `-`
    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        let op = match self.current() {
            Token::Not => UnaryOp::Not,
            Token::Minus => UnaryOp::Negate,
            _ => return self.parse_increment(),
        };
        let start = self.current_start();
        self.advance();
        let operand = self.nested_parse("unary expression", Self::parse_unary)?;
        Ok(Expression::new(
            ExpressionKind::Unary {
                op,
                fixity: Fixity::Prefix,
                operand: Box::new(operand),
            },
            self.span_from(start),
        ))
    }

    /// Prefix and postfix `++` / `--`
    fn parse_increment(&mut self) -> Result<Expression, ParseError> {
        let start = self.current_start();
        let prefix = match self.current() {
            Token::PlusPlus => Some(UnaryOp::Increment),
            Token::MinusMinus => Some(UnaryOp::Decrement),
            _ => None,
        };
        if let Some(op) = prefix {
            self.advance();
            let operand = self.nested_parse("unary expression", Self::parse_increment)?;
            return Ok(Expression::new(
                ExpressionKind::Unary {
                    op,
                    fixity: Fixity::Prefix,
                    operand: Box::new(operand),
                },
                self.span_from(start),
            ));
        }

        let operand = self.parse_postfix()?;
        let op = match self.current() {
            Token::PlusPlus => UnaryOp::Increment,
            Token::MinusMinus => UnaryOp::Decrement,
            _ => return Ok(operand),
        };
        self.advance();
        Ok(Expression::new(
            ExpressionKind::Unary {
                op,
                fixity: Fixity::Postfix,
                operand: Box::new(operand),
            },
            self.span_from(start),
        ))
    }

    /// Calls, subscripts and attribute access chained onto a primary
    pub(super) fn parse_postfix(&mut self) -> Result<Expression, ParseError> {
        let start = self.current_start();
        self.chained_parse(|parser, links| {
            let mut expression = parser.parse_primary()?;
            while matches!(
                parser.current(),
                Token::LeftParen | Token::LeftBracket | Token::Dot
            ) {
                parser.enter_nesting("postfix expression")?;
                *links += 1;
                let kind = match parser.current() {
                    Token::LeftParen => ExpressionKind::Call {
                        callee: Box::new(expression),
                        arguments: parser.parse_arguments()?,
                    },
                    Token::LeftBracket => ExpressionKind::Subscript {
                        target: Box::new(expression),
                        index: Box::new(parser.parse_subscript_index()?),
                    },
                    _ => {
                        parser.advance();
                        ExpressionKind::Attribute {
                            object: Box::new(expression),
                            name: parser.expect_identifier("attribute access")?,
                        }
                    }
                };
                expression = Expression::new(kind, parser.span_from(start));
            }
            Ok(expression)
        })
    }

    /// `(a, b, name=c)`. Positional arguments must come first.
    fn parse_arguments(&mut self) -> Result<Vec<Argument>, ParseError> {
        self.expect(&Token::LeftParen, "argument list")?;
        let mut arguments = Vec::new();
        let mut seen_keyword = false;

        while !self.check(&Token::RightParen) {
            let is_keyword =
                self.current().identifier_name().is_some() && self.peek_at(1) == &Token::Assign;
            if is_keyword {
                let name = self.expect_identifier("argument list")?;
                self.advance();
                let value = self.parse_expression()?;
                arguments.push(Argument::Keyword { name, value });
                seen_keyword = true;
            } else {
                if seen_keyword {
                    return Err(self.syntax_error(
                        SyntaxErrorKind::PositionalAfterKeyword,
                        "argument list",
                    ));
                }
                arguments.push(Argument::Positional(self.parse_expression()?));
            }
            if !self.match_token(&Token::Comma) {
                break;
            }
        }

        self.expect(&Token::RightParen, "argument list")?;
        Ok(arguments)
    }

    /// `[index]` or `[start:end]` with either bound optional
    fn parse_subscript_index(&mut self) -> Result<SubscriptIndex, ParseError> {
        self.expect(&Token::LeftBracket, "subscript")?;
        let first = if self.check(&Token::Colon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        let index = match first {
            Some(index) if !self.check(&Token::Colon) => SubscriptIndex::Index(index),
            start => {
                self.expect(&Token::Colon, "slice")?;
                let end = if self.check(&Token::RightBracket) {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                SubscriptIndex::Slice { start, end }
            }
        };

        self.expect(&Token::RightBracket, "subscript")?;
        Ok(index)
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let start = self.current_start();

        if let Some(name) = self.current().identifier_name() {
            let kind = ExpressionKind::Identifier(name.to_string());
            self.advance();
            return Ok(Expression::new(kind, self.span_from(start)));
        }

        let kind = match self.current().clone() {
            Token::Integer(value) => {
                self.advance();
                ExpressionKind::Integer(value)
            }
            Token::Float(value) => {
                self.advance();
                ExpressionKind::Float(value)
            }
            Token::String(_) => ExpressionKind::String(self.parse_string_literal()?),
            Token::True | Token::False => {
                let value = self.check(&Token::True);
                self.advance();
                ExpressionKind::Boolean(value)
            }
            Token::Null => {
                self.advance();
                ExpressionKind::Null
            }
            Token::LeftParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(&Token::RightParen, "parenthesized expression")?;
                ExpressionKind::Parenthesized(Box::new(inner))
            }
            Token::LeftBracket => self.parse_list()?,
            Token::LeftBrace => self.parse_map()?,
            Token::Fn => self.parse_anonymous_function()?,
            _ => return Err(self.error_expected("expression", "expression")),
        };
        Ok(Expression::new(kind, self.span_from(start)))
    }

    /// `[a, b]` or `[output for pattern in source if filter]`
    fn parse_list(&mut self) -> Result<ExpressionKind, ParseError> {
        self.expect(&Token::LeftBracket, "list")?;
        if self.match_token(&Token::RightBracket) {
            return Ok(ExpressionKind::List(Vec::new()));
        }

        let first = self.parse_expression()?;
        if self.match_token(&Token::For) {
            let pattern = self.parse_pattern("list comprehension")?;
            self.expect(&Token::In, "list comprehension")?;
            let source = self.parse_expression()?;
            let filter = if self.match_token(&Token::If) {
                Some(Box::new(self.parse_expression()?))
            } else {
                None
            };
            self.expect(&Token::RightBracket, "list comprehension")?;
            return Ok(ExpressionKind::ListComprehension {
                output: Box::new(first),
                pattern,
                source: Box::new(source),
                filter,
            });
        }

        let mut elements = vec![first];
        while self.match_token(&Token::Comma) {
            if self.check(&Token::RightBracket) {
                break;
            }
            elements.push(self.parse_expression()?);
        }
        self.expect(&Token::RightBracket, "list")?;
        Ok(ExpressionKind::List(elements))
    }

    /// `{key: value, "key": value}`
    fn parse_map(&mut self) -> Result<ExpressionKind, ParseError> {
        self.expect(&Token::LeftBrace, "map")?;
        let mut entries = Vec::new();

        while !self.check(&Token::RightBrace) {
            let key = if let Some(name) = self.current().identifier_name() {
                let key = MapKey::Identifier(name.to_string());
                self.advance();
                key
            } else if matches!(self.current(), Token::String(_)) {
                MapKey::String(self.parse_string_literal()?)
            } else {
                return Err(self.error_expected("map key", "map"));
            };
            self.expect(&Token::Colon, "map entry")?;
            let value = self.parse_expression()?;
            entries.push(MapEntry { key, value });

            if !self.match_token(&Token::Comma) {
                break;
            }
        }

        self.expect(&Token::RightBrace, "map")?;
        Ok(ExpressionKind::Map(entries))
    }

    /// `fn(params) expression`
    fn parse_anonymous_function(&mut self) -> Result<ExpressionKind, ParseError> {
        self.expect(&Token::Fn, "anonymous function")?;
        let parameters = self.parse_parameter_list("anonymous function")?;
        let body = self.parse_expression()?;
        Ok(ExpressionKind::AnonymousFunction {
            parameters,
            body: Box::new(body),
        })
    }
}
