//! Statement nodes and the source file root

use super::expressions::{Expression, Parameter, Pattern, TypeAnnotation};
use super::span::Span;
use serde::Serialize;
use std::fmt;

/// Root of a parsed script: the top-level statements in source order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SourceFile {
    pub statements: Vec<Statement>,
}

/// An indented statement sequence. Never empty once parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

impl Statement {
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Assignment(Assignment),
    Expression(ExpressionStatement),
    Return(Option<Expression>),
    Yield(Vec<Expression>),
    Pass,
    Break,
    Continue,
    Delete(Expression),
    If(IfStatement),
    For(ForStatement),
    While(WhileStatement),
    FunctionDefinition(FunctionDefinition),
    ArgsBlock(Vec<Parameter>),
    Switch(SwitchStatement),
    Defer(Block),
    ErrorDefer(Block),
    RadBlock(DomainBlock),
    RequestBlock(DomainBlock),
    DisplayBlock(DomainBlock),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub target: Expression,
    pub operator: AssignOp,
    pub value: Expression,
    pub catch: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub catch: Option<Block>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
}

impl AssignOp {
    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubtractAssign => "-=",
            AssignOp::MultiplyAssign => "*=",
            AssignOp::DivideAssign => "/=",
            AssignOp::ModuloAssign => "%=",
        }
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStatement {
    pub condition: Expression,
    pub body: Block,
    pub elif_clauses: Vec<ElifClause>,
    pub else_body: Option<Block>,
}

/// `else if cond:` clause
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElifClause {
    pub condition: Expression,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForStatement {
    pub pattern: Pattern,
    pub iterable: Expression,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchStatement {
    pub subject: Expression,
    pub clauses: Vec<SwitchClause>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchClause {
    /// `None` for the `default` clause
    pub pattern: Option<Expression>,
    pub body: ClauseBody,
    pub span: Span,
}

impl SwitchClause {
    pub fn is_default(&self) -> bool {
        self.pattern.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseBody {
    Block(Block),
    /// `-> a, b, c`
    Arrow(Vec<Expression>),
}

/// Shared shape of `rad`, `request` and `display` blocks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainBlock {
    /// URL for `rad`/`request`, optional data for `display`
    pub source: Option<Expression>,
    pub body: Vec<DomainItem>,
}

impl DomainBlock {
    /// The `fields` clauses' names, in order
    pub fn fields(&self) -> Vec<&str> {
        self.body
            .iter()
            .filter_map(|item| match item {
                DomainItem::Fields(names) => Some(names),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainItem {
    Fields(Vec<String>),
    Sort(SortClause),
    Modifier(FieldModifier),
    Statement(Statement),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortClause {
    pub field: Option<String>,
    pub direction: Option<SortDirection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// `name, name:` followed by an indented list of modifiers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldModifier {
    pub fields: Vec<String>,
    pub modifiers: Vec<Modifier>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Filter(Expression),
    Map(Expression),
    Color(Expression, Option<Expression>),
}
