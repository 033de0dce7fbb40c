//! Type annotations, parameters and loop patterns

use super::parser::Parser;
use crate::rad::ast::{Parameter, Pattern, SimpleType, TypeAnnotation};
use crate::rad::error::{ParseError, SyntaxErrorKind};
use crate::rad::lexer::Token;

impl Parser<'_> {
    /// `int`, `str?`, `int|str`-style chains (right-nested)
    pub(super) fn parse_type(&mut self) -> Result<TypeAnnotation, ParseError> {
        let simple = self.parse_simple_type()?;
        if self.match_token(&Token::Question) {
            return Ok(TypeAnnotation::Nullable(simple));
        }
        if self.match_token(&Token::Pipe) {
            let rest = self.parse_type()?;
            return Ok(TypeAnnotation::Union(simple, Box::new(rest)));
        }
        Ok(TypeAnnotation::Simple(simple))
    }

    fn parse_simple_type(&mut self) -> Result<SimpleType, ParseError> {
        let Some(name) = self.current().identifier_name() else {
            return Err(self.error_expected("type", "type annotation"));
        };
        match SimpleType::from_name(name) {
            Some(ty) => {
                self.advance();
                Ok(ty)
            }
            None => Err(self.syntax_error(
                SyntaxErrorKind::UnknownType(name.to_string()),
                "type annotation",
            )),
        }
    }

    /// `(name [type] [= default], ...)`
    pub(super) fn parse_parameter_list(
        &mut self,
        production: &'static str,
    ) -> Result<Vec<Parameter>, ParseError> {
        self.expect(&Token::LeftParen, production)?;
        let mut parameters = Vec::new();
        while !self.check(&Token::RightParen) {
            parameters.push(self.parse_parameter(production)?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(&Token::RightParen, production)?;
        Ok(parameters)
    }

    /// `name [type] [= default]`, shared by parameter lists and `args` blocks
    pub(super) fn parse_parameter(
        &mut self,
        production: &'static str,
    ) -> Result<Parameter, ParseError> {
        let start = self.current_start();
        let name = self.expect_identifier(production)?;
        let ty = if self.current().identifier_name().is_some() {
            Some(self.parse_type()?)
        } else {
            None
        };
        let default = if self.match_token(&Token::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(Parameter {
            name,
            ty,
            default,
            span: self.span_from(start),
        })
    }

    /// The binding part of `for pattern in ...`: one name or a pair. Never
    /// parsed as an expression.
    pub(super) fn parse_pattern(&mut self, production: &'static str) -> Result<Pattern, ParseError> {
        let first = self.pattern_name(production)?;
        let pattern = if self.match_token(&Token::Comma) {
            Pattern::Pair(first, self.pattern_name(production)?)
        } else {
            Pattern::Single(first)
        };
        if !self.check(&Token::In) {
            return Err(self.invalid_pattern(production));
        }
        Ok(pattern)
    }

    fn pattern_name(&mut self, production: &'static str) -> Result<String, ParseError> {
        match self.current().identifier_name() {
            Some(name) => {
                let name = name.to_string();
                self.advance();
                Ok(name)
            }
            None => Err(self.invalid_pattern(production)),
        }
    }

    fn invalid_pattern(&self, production: &'static str) -> ParseError {
        self.syntax_error(
            SyntaxErrorKind::InvalidPattern(format!("unexpected {}", self.current())),
            production,
        )
    }
}
