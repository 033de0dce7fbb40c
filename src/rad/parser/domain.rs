//! `rad`, `request` and `display` blocks
//!
//! The three blocks share one body grammar: an indented sequence mixing
//! ordinary statements with `fields` clauses, `sort` clauses and field
//! modifier blocks:
//!
//! ```text
//! rad url:
//!     fields name, age
//!     sort age desc
//!     name, age:
//!         filter fn(v) v != null
//!         color "red" age > 60
//! ```
//!
//! The domain words are keywords only at the start of a body item or modifier
//! line; everywhere else they are ordinary identifiers.

use super::parser::Parser;
use crate::rad::ast::{
    DomainBlock, DomainItem, FieldModifier, Modifier, SortClause, SortDirection, Statement,
    StatementKind,
};
use crate::rad::error::ParseError;
use crate::rad::lexer::Token;

impl Parser<'_> {
    pub(super) fn parse_domain_block(&mut self) -> Result<Statement, ParseError> {
        let start = self.current_start();
        let (keyword, _) = self.advance();

        let (production, source) = match keyword {
            Token::Display => {
                let source = if self.check(&Token::Colon) {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                ("display block", source)
            }
            Token::Request => ("request block", Some(self.parse_expression()?)),
            _ => ("rad block", Some(self.parse_expression()?)),
        };
        self.expect(&Token::Colon, production)?;
        let body = self.parse_domain_body(production)?;

        let block = DomainBlock { source, body };
        let kind = match keyword {
            Token::Display => StatementKind::DisplayBlock(block),
            Token::Request => StatementKind::RequestBlock(block),
            _ => StatementKind::RadBlock(block),
        };
        Ok(Statement::new(kind, self.span_from(start)))
    }

    fn parse_domain_body(&mut self, production: &'static str) -> Result<Vec<DomainItem>, ParseError> {
        self.expect_newline(production)?;
        self.expect_indent(production)?;
        self.nested_parse(production, |parser| {
            let mut items = Vec::new();
            while !parser.check(&Token::Dedent) && !parser.is_at_end() {
                items.push(parser.parse_domain_item()?);
            }
            parser.expect(&Token::Dedent, production)?;
            Ok(items)
        })
    }

    fn parse_domain_item(&mut self) -> Result<DomainItem, ParseError> {
        match self.current() {
            Token::Fields => self.parse_fields_clause(),
            Token::Sort => self.parse_sort_clause(),
            _ if self.lookahead_field_modifier() => self.parse_field_modifier(),
            _ => Ok(DomainItem::Statement(self.parse_statement()?)),
        }
    }

    /// `fields a, b, c`
    fn parse_fields_clause(&mut self) -> Result<DomainItem, ParseError> {
        self.expect(&Token::Fields, "fields clause")?;
        let mut names = vec![self.expect_identifier("fields clause")?];
        while self.match_token(&Token::Comma) {
            names.push(self.expect_identifier("fields clause")?);
        }
        self.expect_newline("fields clause")?;
        Ok(DomainItem::Fields(names))
    }

    /// `sort [field] [asc|desc]`
    fn parse_sort_clause(&mut self) -> Result<DomainItem, ParseError> {
        self.expect(&Token::Sort, "sort clause")?;
        let field = match self.current() {
            Token::Asc | Token::Desc => None,
            token if token.identifier_name().is_some() => {
                Some(self.expect_identifier("sort clause")?)
            }
            _ => None,
        };
        let direction = match self.current() {
            Token::Asc => Some(SortDirection::Asc),
            Token::Desc => Some(SortDirection::Desc),
            _ => None,
        };
        if direction.is_some() {
            self.advance();
        }
        self.expect_newline("sort clause")?;
        Ok(DomainItem::Sort(SortClause { field, direction }))
    }

    /// `name (, name)* : Newline` at the cursor
    fn lookahead_field_modifier(&self) -> bool {
        let mut offset = 0;
        loop {
            if self.peek_at(offset).identifier_name().is_none() {
                return false;
            }
            match self.peek_at(offset + 1) {
                Token::Comma => offset += 2,
                Token::Colon => return self.peek_at(offset + 2) == &Token::Newline,
                _ => return false,
            }
        }
    }

    /// `a, b:` followed by an indented list of `filter`, `map` and `color`
    fn parse_field_modifier(&mut self) -> Result<DomainItem, ParseError> {
        let start = self.current_start();
        let mut fields = vec![self.expect_identifier("field modifier")?];
        while self.match_token(&Token::Comma) {
            fields.push(self.expect_identifier("field modifier")?);
        }
        self.expect(&Token::Colon, "field modifier")?;
        self.expect_newline("field modifier")?;
        self.expect_indent("field modifier")?;

        let mut modifiers = Vec::new();
        loop {
            modifiers.push(self.parse_modifier()?);
            if self.check(&Token::Dedent) || self.is_at_end() {
                break;
            }
        }
        self.expect(&Token::Dedent, "field modifier")?;

        Ok(DomainItem::Modifier(FieldModifier {
            fields,
            modifiers,
            span: self.span_from(start),
        }))
    }

    fn parse_modifier(&mut self) -> Result<Modifier, ParseError> {
        let modifier = match self.current() {
            Token::Filter => {
                self.advance();
                Modifier::Filter(self.parse_expression()?)
            }
            Token::Map => {
                self.advance();
                Modifier::Map(self.parse_expression()?)
            }
            Token::Color => {
                self.advance();
                let color = self.parse_expression()?;
                let condition = if self.check(&Token::Newline) {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                Modifier::Color(color, condition)
            }
            Token::Indent => return Err(self.unexpected_indent()),
            _ => {
                return Err(self.error_expected("`filter`, `map` or `color`", "field modifier"));
            }
        };
        self.expect_newline("field modifier")?;
        Ok(modifier)
    }
}
