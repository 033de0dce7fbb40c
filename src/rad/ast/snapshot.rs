//! Normalized tree snapshots of a parsed script
//!
//! [`snapshot_source_file`] is the one traversal of the whole AST. Formatters
//! that only need node names, labels and nesting (the tree view, for one)
//! consume the snapshot instead of walking statements and expressions again.
//!
//! Bodies appear as `Block` nodes so that a statement's own children (its
//! condition, its target) stay apart from the statements it contains.

use super::expressions::{
    Argument, Expression, ExpressionKind, MapKey, Parameter, StringPart, SubscriptIndex,
};
use super::statements::{
    Block, ClauseBody, DomainBlock, DomainItem, Modifier, SourceFile, Statement, StatementKind,
};
use super::traits::AstNode;
use serde::Serialize;

/// A node of the normalized tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AstSnapshot {
    /// The type of node (e.g., "Assignment", "Binary", "Block")
    pub node_type: String,

    /// Short description of the node, may be empty
    pub label: String,

    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children = children;
        self
    }

    /// Total number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(AstSnapshot::node_count).sum::<usize>()
    }
}

/// Snapshot of a whole file. The root node is `SourceFile`.
pub fn snapshot_source_file(file: &SourceFile) -> AstSnapshot {
    AstSnapshot::new(
        "SourceFile",
        format!("{} statement(s)", file.statements.len()),
    )
    .with_children(file.statements.iter().map(snapshot_statement).collect())
}

pub fn snapshot_statement(statement: &Statement) -> AstSnapshot {
    let node = AstSnapshot::new(statement.node_type(), statement.display_label());
    let children = match &statement.kind {
        StatementKind::Assignment(assignment) => {
            let mut children = vec![
                snapshot_expression(&assignment.target),
                snapshot_expression(&assignment.value),
            ];
            children.extend(assignment.catch.as_ref().map(|b| snapshot_block("Catch", b)));
            children
        }
        StatementKind::Expression(statement) => {
            let mut children = vec![snapshot_expression(&statement.expression)];
            children.extend(statement.catch.as_ref().map(|b| snapshot_block("Catch", b)));
            children
        }
        StatementKind::Return(value) => value.iter().map(snapshot_expression).collect(),
        StatementKind::Yield(values) => values.iter().map(snapshot_expression).collect(),
        StatementKind::Delete(target) => vec![snapshot_expression(target)],
        StatementKind::Pass | StatementKind::Break | StatementKind::Continue => Vec::new(),
        StatementKind::If(statement) => {
            let mut children = vec![
                snapshot_expression(&statement.condition),
                snapshot_block("Block", &statement.body),
            ];
            for clause in &statement.elif_clauses {
                children.push(AstSnapshot::new("ElseIf", "").with_children(vec![
                    snapshot_expression(&clause.condition),
                    snapshot_block("Block", &clause.body),
                ]));
            }
            children.extend(statement.else_body.as_ref().map(|b| snapshot_block("Else", b)));
            children
        }
        StatementKind::For(statement) => vec![
            snapshot_expression(&statement.iterable),
            snapshot_block("Block", &statement.body),
        ],
        StatementKind::While(statement) => vec![
            snapshot_expression(&statement.condition),
            snapshot_block("Block", &statement.body),
        ],
        StatementKind::FunctionDefinition(definition) => {
            let mut children: Vec<_> = definition.parameters.iter().map(snapshot_parameter).collect();
            children.push(snapshot_block("Block", &definition.body));
            children
        }
        StatementKind::ArgsBlock(parameters) => parameters.iter().map(snapshot_parameter).collect(),
        StatementKind::Switch(switch) => {
            let mut children = vec![snapshot_expression(&switch.subject)];
            for clause in &switch.clauses {
                let mut clause_children: Vec<_> =
                    clause.pattern.iter().map(snapshot_expression).collect();
                match &clause.body {
                    ClauseBody::Arrow(values) => {
                        clause_children.extend(values.iter().map(snapshot_expression))
                    }
                    ClauseBody::Block(body) => clause_children.push(snapshot_block("Block", body)),
                }
                let node_type = if clause.is_default() { "Default" } else { "Case" };
                children.push(AstSnapshot::new(node_type, "").with_children(clause_children));
            }
            children
        }
        StatementKind::Defer(body) | StatementKind::ErrorDefer(body) => {
            body.statements.iter().map(snapshot_statement).collect()
        }
        StatementKind::RadBlock(domain)
        | StatementKind::RequestBlock(domain)
        | StatementKind::DisplayBlock(domain) => snapshot_domain(domain),
    };
    node.with_children(children)
}

fn snapshot_block(node_type: &str, block: &Block) -> AstSnapshot {
    AstSnapshot::new(node_type, format!("{} statement(s)", block.statements.len()))
        .with_children(block.statements.iter().map(snapshot_statement).collect())
}

fn snapshot_parameter(parameter: &Parameter) -> AstSnapshot {
    let label = match &parameter.ty {
        Some(ty) => format!("{} {}", parameter.name, ty),
        None => parameter.name.clone(),
    };
    AstSnapshot::new("Parameter", label)
        .with_children(parameter.default.iter().map(snapshot_expression).collect())
}

fn snapshot_domain(domain: &DomainBlock) -> Vec<AstSnapshot> {
    let mut children: Vec<_> = domain.source.iter().map(snapshot_expression).collect();
    for item in &domain.body {
        let node = AstSnapshot::new(item.node_type(), item.display_label());
        children.push(match item {
            DomainItem::Fields(_) | DomainItem::Sort(_) => node,
            DomainItem::Modifier(modifier) => {
                node.with_children(modifier.modifiers.iter().map(snapshot_modifier).collect())
            }
            DomainItem::Statement(statement) => snapshot_statement(statement),
        });
    }
    children
}

fn snapshot_modifier(modifier: &Modifier) -> AstSnapshot {
    match modifier {
        Modifier::Filter(value) => {
            AstSnapshot::new("Filter", "").with_children(vec![snapshot_expression(value)])
        }
        Modifier::Map(value) => {
            AstSnapshot::new("Map", "").with_children(vec![snapshot_expression(value)])
        }
        Modifier::Color(value, condition) => {
            let mut children = vec![snapshot_expression(value)];
            children.extend(condition.iter().map(snapshot_expression));
            AstSnapshot::new("Color", "").with_children(children)
        }
    }
}

pub fn snapshot_expression(expression: &Expression) -> AstSnapshot {
    let node = AstSnapshot::new(expression.node_type(), expression.display_label());
    let children = match &expression.kind {
        ExpressionKind::Identifier(_)
        | ExpressionKind::Integer(_)
        | ExpressionKind::Float(_)
        | ExpressionKind::Boolean(_)
        | ExpressionKind::Null => Vec::new(),
        ExpressionKind::String(literal) => literal
            .parts
            .iter()
            .filter_map(|part| match part {
                StringPart::Text(_) => None,
                StringPart::Interpolation { expression, format } => Some(
                    AstSnapshot::new("Interpolation", format.clone().unwrap_or_default())
                        .with_children(vec![snapshot_expression(expression)]),
                ),
            })
            .collect(),
        ExpressionKind::List(items) => items.iter().map(snapshot_expression).collect(),
        ExpressionKind::Map(entries) => entries
            .iter()
            .map(|entry| {
                let key = match &entry.key {
                    MapKey::Identifier(name) => name.clone(),
                    MapKey::String(literal) => {
                        format!("{:?}", literal.as_plain_text().unwrap_or_default())
                    }
                };
                AstSnapshot::new("Entry", key).with_children(vec![snapshot_expression(&entry.value)])
            })
            .collect(),
        ExpressionKind::Parenthesized(inner) => vec![snapshot_expression(inner)],
        ExpressionKind::Binary { left, right, .. } => {
            vec![snapshot_expression(left), snapshot_expression(right)]
        }
        ExpressionKind::Unary { operand, .. } => vec![snapshot_expression(operand)],
        ExpressionKind::Ternary {
            condition,
            then_branch,
            else_branch,
        } => vec![
            snapshot_expression(condition),
            snapshot_expression(then_branch),
            snapshot_expression(else_branch),
        ],
        ExpressionKind::Call { callee, arguments } => {
            let mut children = vec![snapshot_expression(callee)];
            for argument in arguments {
                children.push(match argument {
                    Argument::Positional(value) => snapshot_expression(value),
                    Argument::Keyword { name, value } => AstSnapshot::new("Keyword", name.clone())
                        .with_children(vec![snapshot_expression(value)]),
                });
            }
            children
        }
        ExpressionKind::Subscript { target, index } => {
            let mut children = vec![snapshot_expression(target)];
            match &**index {
                SubscriptIndex::Index(index) => children.push(snapshot_expression(index)),
                SubscriptIndex::Slice { start, end } => children.push(
                    AstSnapshot::new("Slice", "").with_children(
                        start.iter().chain(end.iter()).map(snapshot_expression).collect(),
                    ),
                ),
            }
            children
        }
        ExpressionKind::Attribute { object, .. } => vec![snapshot_expression(object)],
        ExpressionKind::ListComprehension {
            output,
            source,
            filter,
            ..
        } => {
            let mut children = vec![snapshot_expression(output), snapshot_expression(source)];
            children.extend(filter.as_deref().map(snapshot_expression));
            children
        }
        ExpressionKind::AnonymousFunction { parameters, body } => {
            let mut children: Vec<_> = parameters.iter().map(snapshot_parameter).collect();
            children.push(snapshot_expression(body));
            children
        }
    };
    node.with_children(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rad::parser::parse_source;

    #[test]
    fn test_snapshot_shape() {
        let file = parse_source("if a:\n    x = f(1, k=2)\nelse:\n    pass\n").unwrap();
        let snapshot = snapshot_source_file(&file);

        assert_eq!(snapshot.node_type, "SourceFile");
        let if_node = &snapshot.children[0];
        let kinds: Vec<&str> = if_node.children.iter().map(|c| c.node_type.as_str()).collect();
        assert_eq!(kinds, vec!["Identifier", "Block", "Else"]);

        let assignment = &if_node.children[1].children[0];
        assert_eq!(assignment.node_type, "Assignment");
        assert_eq!(assignment.label, "=");
        let call = &assignment.children[1];
        assert_eq!(call.children[2].node_type, "Keyword");
        assert_eq!(call.children[2].label, "k");
    }

    #[test]
    fn test_node_count() {
        let file = parse_source("x = 1 + 2\n").unwrap();
        // SourceFile, Assignment, Identifier, Binary, Integer, Integer
        assert_eq!(snapshot_source_file(&file).node_count(), 6);
    }
}
