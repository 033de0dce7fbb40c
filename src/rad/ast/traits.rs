//! AST traits - Common interfaces for uniform node access
//!
//! Used by the tree formatter and the test assertions to describe nodes
//! without matching on every variant.

use super::expressions::{Expression, ExpressionKind, StringPart};
use super::span::Span;
use super::statements::{DomainItem, Statement, StatementKind};

/// Common interface for all AST nodes
pub trait AstNode {
    fn node_type(&self) -> &'static str;
    fn display_label(&self) -> String;
}

/// Nodes that know where they came from
pub trait Spanned {
    fn span(&self) -> Span;
}

impl Spanned for Statement {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for Expression {
    fn span(&self) -> Span {
        self.span
    }
}

impl AstNode for Statement {
    fn node_type(&self) -> &'static str {
        match &self.kind {
            StatementKind::Assignment(_) => "Assignment",
            StatementKind::Expression(_) => "ExpressionStatement",
            StatementKind::Return(_) => "Return",
            StatementKind::Yield(_) => "Yield",
            StatementKind::Pass => "Pass",
            StatementKind::Break => "Break",
            StatementKind::Continue => "Continue",
            StatementKind::Delete(_) => "Delete",
            StatementKind::If(_) => "If",
            StatementKind::For(_) => "For",
            StatementKind::While(_) => "While",
            StatementKind::FunctionDefinition(_) => "FunctionDefinition",
            StatementKind::ArgsBlock(_) => "ArgsBlock",
            StatementKind::Switch(_) => "Switch",
            StatementKind::Defer(_) => "Defer",
            StatementKind::ErrorDefer(_) => "ErrorDefer",
            StatementKind::RadBlock(_) => "RadBlock",
            StatementKind::RequestBlock(_) => "RequestBlock",
            StatementKind::DisplayBlock(_) => "DisplayBlock",
        }
    }

    fn display_label(&self) -> String {
        match &self.kind {
            StatementKind::Assignment(assignment) => assignment.operator.symbol().to_string(),
            StatementKind::FunctionDefinition(def) => def.name.clone(),
            StatementKind::For(stmt) => stmt.pattern.to_string(),
            StatementKind::ArgsBlock(params) => params
                .iter()
                .map(|param| param.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            StatementKind::Yield(values) => format!("{} value(s)", values.len()),
            StatementKind::Switch(switch) => format!("{} clause(s)", switch.clauses.len()),
            _ => String::new(),
        }
    }
}

impl AstNode for Expression {
    fn node_type(&self) -> &'static str {
        match &self.kind {
            ExpressionKind::Identifier(_) => "Identifier",
            ExpressionKind::Integer(_) => "Integer",
            ExpressionKind::Float(_) => "Float",
            ExpressionKind::String(_) => "String",
            ExpressionKind::Boolean(_) => "Boolean",
            ExpressionKind::Null => "Null",
            ExpressionKind::List(_) => "List",
            ExpressionKind::Map(_) => "Map",
            ExpressionKind::Parenthesized(_) => "Parenthesized",
            ExpressionKind::Binary { .. } => "Binary",
            ExpressionKind::Unary { .. } => "Unary",
            ExpressionKind::Ternary { .. } => "Ternary",
            ExpressionKind::Call { .. } => "Call",
            ExpressionKind::Subscript { .. } => "Subscript",
            ExpressionKind::Attribute { .. } => "Attribute",
            ExpressionKind::ListComprehension { .. } => "ListComprehension",
            ExpressionKind::AnonymousFunction { .. } => "AnonymousFunction",
        }
    }

    fn display_label(&self) -> String {
        match &self.kind {
            ExpressionKind::Identifier(name) => name.clone(),
            ExpressionKind::Integer(value) => value.to_string(),
            ExpressionKind::Float(value) => value.to_string(),
            ExpressionKind::Boolean(value) => value.to_string(),
            ExpressionKind::Null => "null".to_string(),
            ExpressionKind::String(literal) => {
                let text: String = literal
                    .parts
                    .iter()
                    .map(|part| match part {
                        StringPart::Text(text) => text.clone(),
                        StringPart::Interpolation { .. } => "{…}".to_string(),
                    })
                    .collect();
                format!("{text:?}")
            }
            ExpressionKind::List(items) => format!("{} item(s)", items.len()),
            ExpressionKind::Map(entries) => format!("{} entr(ies)", entries.len()),
            ExpressionKind::Binary { op, .. } => op.symbol().to_string(),
            ExpressionKind::Unary { op, .. } => op.symbol().to_string(),
            ExpressionKind::Attribute { name, .. } => format!(".{name}"),
            ExpressionKind::ListComprehension { pattern, .. } => pattern.to_string(),
            ExpressionKind::AnonymousFunction { parameters, .. } => {
                format!("{} param(s)", parameters.len())
            }
            _ => String::new(),
        }
    }
}

impl AstNode for DomainItem {
    fn node_type(&self) -> &'static str {
        match self {
            DomainItem::Fields(_) => "Fields",
            DomainItem::Sort(_) => "Sort",
            DomainItem::Modifier(_) => "FieldModifier",
            DomainItem::Statement(statement) => statement.node_type(),
        }
    }

    fn display_label(&self) -> String {
        match self {
            DomainItem::Fields(names) => names.join(", "),
            DomainItem::Sort(sort) => {
                let mut label = sort.field.clone().unwrap_or_default();
                if let Some(direction) = sort.direction {
                    if !label.is_empty() {
                        label.push(' ');
                    }
                    label.push_str(direction.keyword());
                }
                label
            }
            DomainItem::Modifier(modifier) => modifier.fields.join(", "),
            DomainItem::Statement(statement) => statement.display_label(),
        }
    }
}
