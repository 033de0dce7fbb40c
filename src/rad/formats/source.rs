//! Unparser: AST back to rad source
//!
//! Produces canonical source text: four spaces per indentation level, single
//! spaces around binary operators, no comments, no blank lines. Parentheses
//! are printed exactly where the tree has a `Parenthesized` node and nowhere
//! else, so parsing the output yields a structurally equal tree. This is
//! what the round-trip tests rely on.

use super::registry::{FormatError, Formatter};
use crate::rad::ast::{
    Argument, Block, ClauseBody, DomainBlock, DomainItem, Expression, ExpressionKind, Fixity,
    MapKey, Modifier, Parameter, QuoteKind, SourceFile, Statement, StatementKind, StringLiteral,
    StringPart, SubscriptIndex, UnaryOp,
};

const INDENT: &str = "    ";

/// Trait for converting a node to rad source text
pub trait ToRadSource {
    fn to_rad_source(&self) -> String;
}

/// Render a whole file
pub fn to_source(file: &SourceFile) -> String {
    let mut output = String::new();
    for statement in &file.statements {
        write_statement(&mut output, statement, 0);
    }
    output
}

pub struct SourceFormatter;

impl Formatter for SourceFormatter {
    fn name(&self) -> &str {
        "source"
    }

    fn serialize(&self, file: &SourceFile) -> Result<String, FormatError> {
        Ok(to_source(file))
    }

    fn description(&self) -> &str {
        "Canonical rad source"
    }
}

fn write_line(output: &mut String, depth: usize, line: &str) {
    output.push_str(&INDENT.repeat(depth));
    output.push_str(line);
    output.push('\n');
}

fn write_block(output: &mut String, block: &Block, depth: usize) {
    for statement in &block.statements {
        write_statement(output, statement, depth);
    }
}

/// A header line ending in `:` followed by its indented body
fn write_compound(output: &mut String, depth: usize, header: &str, body: &Block) {
    write_line(output, depth, &format!("{header}:"));
    write_block(output, body, depth + 1);
}

/// Statement text followed by either the end of line or a `catch:` block
fn write_with_catch(output: &mut String, depth: usize, line: &str, catch: Option<&Block>) {
    match catch {
        Some(block) => write_compound(output, depth, &format!("{line} catch"), block),
        None => write_line(output, depth, line),
    }
}

fn write_statement(output: &mut String, statement: &Statement, depth: usize) {
    match &statement.kind {
        StatementKind::Assignment(assignment) => {
            let line = format!(
                "{} {} {}",
                assignment.target.to_rad_source(),
                assignment.operator,
                assignment.value.to_rad_source()
            );
            write_with_catch(output, depth, &line, assignment.catch.as_ref());
        }
        StatementKind::Expression(statement) => {
            let line = statement.expression.to_rad_source();
            write_with_catch(output, depth, &line, statement.catch.as_ref());
        }
        StatementKind::Return(None) => write_line(output, depth, "return"),
        StatementKind::Return(Some(value)) => {
            write_line(output, depth, &format!("return {}", value.to_rad_source()))
        }
        StatementKind::Yield(values) => {
            write_line(output, depth, &format!("yield {}", join(values)))
        }
        StatementKind::Pass => write_line(output, depth, "pass"),
        StatementKind::Break => write_line(output, depth, "break"),
        StatementKind::Continue => write_line(output, depth, "continue"),
        StatementKind::Delete(target) => {
            write_line(output, depth, &format!("del {}", target.to_rad_source()))
        }
        StatementKind::If(statement) => {
            let header = format!("if {}", statement.condition.to_rad_source());
            write_compound(output, depth, &header, &statement.body);
            for clause in &statement.elif_clauses {
                let header = format!("else if {}", clause.condition.to_rad_source());
                write_compound(output, depth, &header, &clause.body);
            }
            if let Some(else_body) = &statement.else_body {
                write_compound(output, depth, "else", else_body);
            }
        }
        StatementKind::For(statement) => {
            let header = format!(
                "for {} in {}",
                statement.pattern,
                statement.iterable.to_rad_source()
            );
            write_compound(output, depth, &header, &statement.body);
        }
        StatementKind::While(statement) => {
            let header = format!("while {}", statement.condition.to_rad_source());
            write_compound(output, depth, &header, &statement.body);
        }
        StatementKind::FunctionDefinition(definition) => {
            let mut header = format!(
                "fn {}({})",
                definition.name,
                join(&definition.parameters)
            );
            if let Some(return_type) = &definition.return_type {
                header.push_str(&format!(" -> {return_type}"));
            }
            write_compound(output, depth, &header, &definition.body);
        }
        StatementKind::ArgsBlock(parameters) => {
            write_line(output, depth, "args:");
            for parameter in parameters {
                write_line(output, depth + 1, &parameter.to_rad_source());
            }
        }
        StatementKind::Switch(switch) => {
            write_line(output, depth, &format!("switch {}:", switch.subject.to_rad_source()));
            for clause in &switch.clauses {
                let head = match &clause.pattern {
                    Some(pattern) => format!("case {}", pattern.to_rad_source()),
                    None => "default".to_string(),
                };
                match &clause.body {
                    ClauseBody::Arrow(values) => {
                        write_line(output, depth + 1, &format!("{head} -> {}", join(values)))
                    }
                    ClauseBody::Block(body) => write_compound(output, depth + 1, &head, body),
                }
            }
        }
        StatementKind::Defer(body) => write_compound(output, depth, "defer", body),
        StatementKind::ErrorDefer(body) => write_compound(output, depth, "errdefer", body),
        StatementKind::RadBlock(domain) => write_domain(output, depth, "rad", domain),
        StatementKind::RequestBlock(domain) => write_domain(output, depth, "request", domain),
        StatementKind::DisplayBlock(domain) => write_domain(output, depth, "display", domain),
    }
}

fn write_domain(output: &mut String, depth: usize, keyword: &str, domain: &DomainBlock) {
    let header = match &domain.source {
        Some(source) => format!("{keyword} {}:", source.to_rad_source()),
        None => format!("{keyword}:"),
    };
    write_line(output, depth, &header);

    for item in &domain.body {
        match item {
            DomainItem::Fields(names) => {
                write_line(output, depth + 1, &format!("fields {}", names.join(", ")))
            }
            DomainItem::Sort(sort) => {
                let mut line = "sort".to_string();
                if let Some(field) = &sort.field {
                    line.push(' ');
                    line.push_str(field);
                }
                if let Some(direction) = sort.direction {
                    line.push(' ');
                    line.push_str(direction.keyword());
                }
                write_line(output, depth + 1, &line);
            }
            DomainItem::Modifier(modifier) => {
                write_line(output, depth + 1, &format!("{}:", modifier.fields.join(", ")));
                for entry in &modifier.modifiers {
                    let line = match entry {
                        Modifier::Filter(value) => format!("filter {}", value.to_rad_source()),
                        Modifier::Map(value) => format!("map {}", value.to_rad_source()),
                        Modifier::Color(value, None) => format!("color {}", value.to_rad_source()),
                        Modifier::Color(value, Some(condition)) => format!(
                            "color {} {}",
                            value.to_rad_source(),
                            condition.to_rad_source()
                        ),
                    };
                    write_line(output, depth + 2, &line);
                }
            }
            DomainItem::Statement(statement) => write_statement(output, statement, depth + 1),
        }
    }
}

fn join<T: ToRadSource>(items: &[T]) -> String {
    items
        .iter()
        .map(ToRadSource::to_rad_source)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ToRadSource for Expression {
    fn to_rad_source(&self) -> String {
        match &self.kind {
            ExpressionKind::Identifier(name) => name.clone(),
            ExpressionKind::Integer(value) => value.to_string(),
            ExpressionKind::Float(value) => {
                let text = value.to_string();
                if text.contains('.') {
                    text
                } else {
                    format!("{text}.0")
                }
            }
            ExpressionKind::String(literal) => literal.to_rad_source(),
            ExpressionKind::Boolean(value) => value.to_string(),
            ExpressionKind::Null => "null".to_string(),
            ExpressionKind::List(items) => format!("[{}]", join(items)),
            ExpressionKind::Map(entries) => {
                let entries: Vec<String> = entries
                    .iter()
                    .map(|entry| {
                        let key = match &entry.key {
                            MapKey::Identifier(name) => name.clone(),
                            MapKey::String(literal) => literal.to_rad_source(),
                        };
                        format!("{key}: {}", entry.value.to_rad_source())
                    })
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
            ExpressionKind::Parenthesized(inner) => format!("({})", inner.to_rad_source()),
            ExpressionKind::Binary { op, left, right } => format!(
                "{} {} {}",
                left.to_rad_source(),
                op,
                right.to_rad_source()
            ),
            ExpressionKind::Unary {
                op,
                fixity,
                operand,
            } => {
                let operand = operand.to_rad_source();
                match (op, fixity) {
                    (UnaryOp::Not, _) => format!("not {operand}"),
                    // `- -x`, never `--x`
                    (UnaryOp::Negate, _) if operand.starts_with('-') => format!("- {operand}"),
                    (_, Fixity::Prefix) => format!("{op}{operand}"),
                    (_, Fixity::Postfix) => format!("{operand}{op}"),
                }
            }
            ExpressionKind::Ternary {
                condition,
                then_branch,
                else_branch,
            } => format!(
                "{} ? {} : {}",
                condition.to_rad_source(),
                then_branch.to_rad_source(),
                else_branch.to_rad_source()
            ),
            ExpressionKind::Call { callee, arguments } => {
                format!("{}({})", callee.to_rad_source(), join(arguments))
            }
            ExpressionKind::Subscript { target, index } => {
                let index = match &**index {
                    SubscriptIndex::Index(index) => index.to_rad_source(),
                    SubscriptIndex::Slice { start, end } => format!(
                        "{}:{}",
                        start.as_ref().map(ToRadSource::to_rad_source).unwrap_or_default(),
                        end.as_ref().map(ToRadSource::to_rad_source).unwrap_or_default()
                    ),
                };
                format!("{}[{}]", target.to_rad_source(), index)
            }
            ExpressionKind::Attribute { object, name } => {
                format!("{}.{}", object.to_rad_source(), name)
            }
            ExpressionKind::ListComprehension {
                output,
                pattern,
                source,
                filter,
            } => {
                let filter = filter
                    .as_ref()
                    .map(|filter| format!(" if {}", filter.to_rad_source()))
                    .unwrap_or_default();
                format!(
                    "[{} for {} in {}{}]",
                    output.to_rad_source(),
                    pattern,
                    source.to_rad_source(),
                    filter
                )
            }
            ExpressionKind::AnonymousFunction { parameters, body } => {
                format!("fn({}) {}", join(parameters), body.to_rad_source())
            }
        }
    }
}

impl ToRadSource for Argument {
    fn to_rad_source(&self) -> String {
        match self {
            Argument::Positional(value) => value.to_rad_source(),
            Argument::Keyword { name, value } => format!("{name}={}", value.to_rad_source()),
        }
    }
}

impl ToRadSource for Parameter {
    fn to_rad_source(&self) -> String {
        let mut text = self.name.clone();
        if let Some(ty) = &self.ty {
            text.push_str(&format!(" {ty}"));
        }
        if let Some(default) = &self.default {
            text.push_str(&format!(" = {}", default.to_rad_source()));
        }
        text
    }
}

impl ToRadSource for StringLiteral {
    fn to_rad_source(&self) -> String {
        let mut text = self.quote.delimiter().to_string();
        for part in &self.parts {
            match part {
                StringPart::Text(run) => escape_into(&mut text, run, self.quote),
                StringPart::Interpolation { expression, format } => {
                    text.push('{');
                    text.push_str(&expression.to_rad_source());
                    if let Some(format) = format {
                        text.push(':');
                        text.push_str(format);
                    }
                    text.push('}');
                }
            }
        }
        text.push_str(self.quote.delimiter());
        text
    }
}

fn escape_into(output: &mut String, text: &str, quote: QuoteKind) {
    let quote_char = match quote {
        QuoteKind::Single => '\'',
        QuoteKind::Double | QuoteKind::Triple => '"',
    };
    for c in text.chars() {
        match c {
            '\\' => output.push_str("\\\\"),
            '{' => output.push_str("\\{"),
            '\n' => output.push_str("\\n"),
            '\t' => output.push_str("\\t"),
            '\r' => output.push_str("\\r"),
            c if c == quote_char => {
                output.push('\\');
                output.push(c);
            }
            c => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rad::parser::parse_source;
    use crate::rad::testing::structure;

    fn round_trip(source: &str) -> String {
        to_source(&parse_source(source).unwrap())
    }

    #[test]
    fn test_canonical_layout() {
        assert_eq!(
            round_trip("if  a :\n  x=f( 1,k = 2 )\nelse :\n  pass\n"),
            "if a:\n    x = f(1, k=2)\nelse:\n    pass\n"
        );
    }

    #[test]
    fn test_parentheses_are_preserved_not_added() {
        assert_eq!(round_trip("x = (a + b) * c\n"), "x = (a + b) * c\n");
        assert_eq!(round_trip("x = a + b * c\n"), "x = a + b * c\n");
    }

    #[test]
    fn test_negation_of_negation_keeps_a_space() {
        assert_eq!(round_trip("x = - -y\n"), "x = - -y\n");
        assert_eq!(round_trip("x = -y--\n"), "x = -y--\n");
    }

    #[test]
    fn test_strings_are_reescaped() {
        assert_eq!(
            round_trip("s = 'it\\'s {n:>3} \\{literal}\\n'\n"),
            "s = 'it\\'s {n:>3} \\{literal}\\n'\n"
        );
        assert_eq!(round_trip("s = \"\"\"a\nb\"\"\"\n"), "s = \"\"\"a\\nb\"\"\"\n");
    }

    #[test]
    fn test_floats_keep_a_decimal_point() {
        assert_eq!(round_trip("x = 1_000.0\n"), "x = 1000.0\n");
        assert_eq!(round_trip("x = 2.50\n"), "x = 2.5\n");
    }

    #[test]
    fn test_output_reparses_to_the_same_tree() {
        let source = "fn f(a int?, b = [1, 2,]) -> str|int:\n    switch a:\n        case 1 -> \"one\"\n        default:\n            return {k: b[1:], \"s\": fn(x) x ?? 0}\ndisplay:\n    fields a\n    a:\n        color \"red\" a > 1\n";
        let file = parse_source(source).unwrap();
        let reparsed = parse_source(&to_source(&file)).unwrap();
        assert_eq!(structure(&file), structure(&reparsed));
    }
}
