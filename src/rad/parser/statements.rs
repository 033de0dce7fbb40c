//! Statement parsing
//!
//! Statements are dispatched on their leading token. Simple statements end at
//! the `Newline` the indentation transform places at the end of each logical
//! line. Compound statements have a header ending in `:` followed by an
//! indented block: `Newline Indent statement+ Dedent`.

use super::parser::Parser;
use crate::rad::ast::{
    Block, ClauseBody, ElifClause, ForStatement, FunctionDefinition, IfStatement, Statement,
    StatementKind, SwitchClause, SwitchStatement, WhileStatement,
};
use crate::rad::error::ParseError;
use crate::rad::lexer::Token;

impl Parser<'_> {
    /// Parses one statement starting at the cursor.
    pub(super) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.current() {
            Token::If => self.parse_if(),
            Token::For => self.parse_for(),
            Token::While => self.parse_while(),
            Token::Fn if self.peek_at(1).identifier_name().is_some() => {
                self.parse_function_definition()
            }
            Token::Args => self.parse_args_block(),
            Token::Switch => self.parse_switch(),
            Token::Defer | Token::Errdefer => self.parse_defer(),
            Token::Rad | Token::Request | Token::Display => self.parse_domain_block(),
            Token::Return
            | Token::Yield
            | Token::Pass
            | Token::Break
            | Token::Continue
            | Token::Del => self.parse_simple_statement(),
            Token::Indent => Err(self.unexpected_indent()),
            _ => self.parse_assignment_or_expression(),
        }
    }

    /// `Newline Indent statement+ Dedent`
    pub(super) fn parse_block(&mut self, production: &'static str) -> Result<Block, ParseError> {
        self.expect_newline(production)?;
        self.expect_indent(production)?;
        self.nested_parse(production, |parser| {
            let mut statements = Vec::new();
            while !parser.check(&Token::Dedent) && !parser.is_at_end() {
                statements.push(parser.parse_statement()?);
            }
            parser.expect(&Token::Dedent, production)?;
            Ok(Block { statements })
        })
    }

    /// `catch:` with its block, or the plain end of line
    pub(super) fn parse_catch_or_newline(
        &mut self,
        production: &'static str,
    ) -> Result<Option<Block>, ParseError> {
        if self.match_token(&Token::Catch) {
            self.expect(&Token::Colon, "catch block")?;
            return Ok(Some(self.parse_block("catch block")?));
        }
        self.expect_newline(production)?;
        Ok(None)
    }

    fn parse_simple_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_start();
        let (keyword, _) = self.advance();

        let (kind, production) = match keyword {
            Token::Return => {
                let value = if self.check(&Token::Newline) {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                (StatementKind::Return(value), "return statement")
            }
            Token::Yield => {
                let mut values = vec![self.parse_expression()?];
                while self.match_token(&Token::Comma) {
                    values.push(self.parse_expression()?);
                }
                (StatementKind::Yield(values), "yield statement")
            }
            Token::Del => (
                StatementKind::Delete(self.parse_expression()?),
                "del statement",
            ),
            Token::Break => (StatementKind::Break, "break statement"),
            Token::Continue => (StatementKind::Continue, "continue statement"),
            _ => (StatementKind::Pass, "pass statement"),
        };

        let span = self.span_from(start);
        self.expect_newline(production)?;
        Ok(Statement::new(kind, span))
    }

    /// `if c:` block, any number of `else if c:` blocks, optional `else:` block
    fn parse_if(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_start();
        self.expect(&Token::If, "if statement")?;
        let condition = self.parse_expression()?;
        self.expect(&Token::Colon, "if statement")?;
        let body = self.parse_block("if statement")?;

        let mut elif_clauses = Vec::new();
        let mut else_body = None;
        while self.check(&Token::Else) {
            let clause_start = self.current_start();
            self.advance();
            if self.match_token(&Token::If) {
                let condition = self.parse_expression()?;
                self.expect(&Token::Colon, "else if clause")?;
                let body = self.parse_block("else if clause")?;
                elif_clauses.push(ElifClause {
                    condition,
                    body,
                    span: self.span_from(clause_start),
                });
            } else {
                self.expect(&Token::Colon, "else clause")?;
                else_body = Some(self.parse_block("else clause")?);
                break;
            }
        }

        Ok(Statement::new(
            StatementKind::If(IfStatement {
                condition,
                body,
                elif_clauses,
                else_body,
            }),
            self.span_from(start),
        ))
    }

    fn parse_for(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_start();
        self.expect(&Token::For, "for statement")?;
        let pattern = self.parse_pattern("for statement")?;
        self.expect(&Token::In, "for statement")?;
        let iterable = self.parse_expression()?;
        self.expect(&Token::Colon, "for statement")?;
        let body = self.parse_block("for statement")?;
        Ok(Statement::new(
            StatementKind::For(ForStatement {
                pattern,
                iterable,
                body,
            }),
            self.span_from(start),
        ))
    }

    fn parse_while(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_start();
        self.expect(&Token::While, "while statement")?;
        let condition = self.parse_expression()?;
        self.expect(&Token::Colon, "while statement")?;
        let body = self.parse_block("while statement")?;
        Ok(Statement::new(
            StatementKind::While(WhileStatement { condition, body }),
            self.span_from(start),
        ))
    }

    /// `fn name(params) [-> type]:` block
    fn parse_function_definition(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_start();
        self.expect(&Token::Fn, "function definition")?;
        let name = self.expect_identifier("function definition")?;
        let parameters = self.parse_parameter_list("function definition")?;
        let return_type = if self.match_token(&Token::Arrow) {
            Some(self.parse_type()?)
        } else {
            None
        };
        self.expect(&Token::Colon, "function definition")?;
        let body = self.parse_block("function definition")?;
        Ok(Statement::new(
            StatementKind::FunctionDefinition(FunctionDefinition {
                name,
                parameters,
                return_type,
                body,
            }),
            self.span_from(start),
        ))
    }

    /// `args:` followed by one declaration per line, no nested blocks
    fn parse_args_block(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_start();
        self.expect(&Token::Args, "args block")?;
        self.expect(&Token::Colon, "args block")?;
        self.expect_newline("args block")?;
        self.expect_indent("args block")?;

        let mut parameters = Vec::new();
        while !self.check(&Token::Dedent) && !self.is_at_end() {
            if self.check(&Token::Indent) {
                return Err(self.unexpected_indent());
            }
            parameters.push(self.parse_parameter("argument declaration")?);
            self.expect_newline("argument declaration")?;
        }
        self.expect(&Token::Dedent, "args block")?;

        Ok(Statement::new(
            StatementKind::ArgsBlock(parameters),
            self.span_from(start),
        ))
    }

    /// `switch subject:` with one or more `case`/`default` clauses
    fn parse_switch(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_start();
        self.expect(&Token::Switch, "switch statement")?;
        let subject = self.parse_expression()?;
        self.expect(&Token::Colon, "switch statement")?;
        self.expect_newline("switch statement")?;
        self.expect_indent("switch statement")?;

        let mut clauses = Vec::new();
        loop {
            clauses.push(self.parse_switch_clause()?);
            if self.check(&Token::Dedent) || self.is_at_end() {
                break;
            }
        }
        self.expect(&Token::Dedent, "switch statement")?;

        Ok(Statement::new(
            StatementKind::Switch(SwitchStatement { subject, clauses }),
            self.span_from(start),
        ))
    }

    /// `case p:` block, `case p -> e, e`, and the same for `default`
    fn parse_switch_clause(&mut self) -> Result<SwitchClause, ParseError> {
        let start = self.current_start();
        let pattern = match self.current() {
            Token::Case => {
                self.advance();
                Some(self.parse_expression()?)
            }
            Token::Default => {
                self.advance();
                None
            }
            Token::Indent => return Err(self.unexpected_indent()),
            _ => return Err(self.error_expected("`case` or `default`", "switch statement")),
        };

        let body = if self.match_token(&Token::Arrow) {
            let mut values = vec![self.parse_expression()?];
            while self.match_token(&Token::Comma) {
                values.push(self.parse_expression()?);
            }
            self.expect_newline("switch clause")?;
            ClauseBody::Arrow(values)
        } else {
            self.expect(&Token::Colon, "switch clause")?;
            ClauseBody::Block(self.parse_block("switch clause")?)
        };

        Ok(SwitchClause {
            pattern,
            body,
            span: self.span_from(start),
        })
    }

    /// `defer:` and `errdefer:` blocks
    fn parse_defer(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_start();
        let (keyword, _) = self.advance();
        self.expect(&Token::Colon, "defer block")?;
        let body = self.parse_block("defer block")?;
        let kind = match keyword {
            Token::Errdefer => StatementKind::ErrorDefer(body),
            _ => StatementKind::Defer(body),
        };
        Ok(Statement::new(kind, self.span_from(start)))
    }
}
