//! Expression nodes
//!
//! Every expression owns its children; nodes are built once by the parser and
//! never mutated afterwards.

use super::span::Span;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The identifier name, if this is a bare identifier
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExpressionKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Whether this expression may appear on the left of `=`
    pub fn is_assignable(&self) -> bool {
        matches!(
            self.kind,
            ExpressionKind::Identifier(_)
                | ExpressionKind::Subscript { .. }
                | ExpressionKind::Attribute { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionKind {
    Identifier(String),
    Integer(i64),
    Float(f64),
    String(StringLiteral),
    Boolean(bool),
    Null,
    List(Vec<Expression>),
    Map(Vec<MapEntry>),
    Parenthesized(Box<Expression>),
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Unary {
        op: UnaryOp,
        fixity: Fixity,
        operand: Box<Expression>,
    },
    Ternary {
        condition: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Box<Expression>,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Argument>,
    },
    Subscript {
        target: Box<Expression>,
        index: Box<SubscriptIndex>,
    },
    Attribute {
        object: Box<Expression>,
        name: String,
    },
    ListComprehension {
        output: Box<Expression>,
        pattern: Pattern,
        source: Box<Expression>,
        filter: Option<Box<Expression>>,
    },
    AnonymousFunction {
        parameters: Vec<Parameter>,
        body: Box<Expression>,
    },
}

/// Which quote sequence delimited a string literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteKind {
    Double,
    Single,
    Triple,
}

impl QuoteKind {
    pub fn delimiter(self) -> &'static str {
        match self {
            QuoteKind::Double => "\"",
            QuoteKind::Single => "'",
            QuoteKind::Triple => "\"\"\"",
        }
    }

    /// Only triple-quoted strings may span physical lines
    pub fn allows_newlines(self) -> bool {
        matches!(self, QuoteKind::Triple)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringLiteral {
    pub quote: QuoteKind,
    pub parts: Vec<StringPart>,
}

impl StringLiteral {
    /// The literal text when the string has no interpolations
    pub fn as_plain_text(&self) -> Option<String> {
        let mut text = String::new();
        for part in &self.parts {
            match part {
                StringPart::Text(segment) => text.push_str(segment),
                StringPart::Interpolation { .. } => return None,
            }
        }
        Some(text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StringPart {
    /// Literal text with escapes already decoded
    Text(String),
    Interpolation {
        expression: Expression,
        format: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapEntry {
    pub key: MapKey,
    pub value: Expression,
}

/// Map keys keep their source form; identifier keys are implicit string keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapKey {
    Identifier(String),
    String(StringLiteral),
}

impl MapKey {
    /// The key as a string, when it is known at parse time
    pub fn text(&self) -> Option<String> {
        match self {
            MapKey::Identifier(name) => Some(name.clone()),
            MapKey::String(literal) => literal.as_plain_text(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Argument {
    Positional(Expression),
    Keyword { name: String, value: Expression },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptIndex {
    Index(Expression),
    Slice {
        start: Option<Expression>,
        end: Option<Expression>,
    },
}

/// Binding form of a `for` loop or comprehension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Single(String),
    Pair(String, String),
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Single(name) => write!(f, "{name}"),
            Pattern::Pair(first, second) => write!(f, "{first}, {second}"),
        }
    }
}

/// Function parameter or `args` declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub ty: Option<TypeAnnotation>,
    pub default: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeAnnotation {
    Simple(SimpleType),
    Nullable(SimpleType),
    Union(SimpleType, Box<TypeAnnotation>),
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeAnnotation::Simple(ty) => write!(f, "{ty}"),
            TypeAnnotation::Nullable(ty) => write!(f, "{ty}?"),
            TypeAnnotation::Union(ty, rest) => write!(f, "{ty}|{rest}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimpleType {
    Bool,
    Int,
    Float,
    Str,
    Json,
    Any,
    List,
    Map,
}

impl SimpleType {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "bool" => SimpleType::Bool,
            "int" => SimpleType::Int,
            "float" => SimpleType::Float,
            "str" => SimpleType::Str,
            "json" => SimpleType::Json,
            "any" => SimpleType::Any,
            "list" => SimpleType::List,
            "map" => SimpleType::Map,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            SimpleType::Bool => "bool",
            SimpleType::Int => "int",
            SimpleType::Float => "float",
            SimpleType::Str => "str",
            SimpleType::Json => "json",
            SimpleType::Any => "any",
            SimpleType::List => "list",
            SimpleType::Map => "map",
        }
    }
}

impl fmt::Display for SimpleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Or,
    And,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    NullCoalesce,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    In,
    NotIn,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "or",
            BinaryOp::And => "and",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::NullCoalesce => "??",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::In => "in",
            BinaryOp::NotIn => "not in",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Not,
    Negate,
    Increment,
    Decrement,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
            UnaryOp::Negate => "-",
            UnaryOp::Increment => "++",
            UnaryOp::Decrement => "--",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fixity {
    Prefix,
    Postfix,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_annotation_display() {
        let ty = TypeAnnotation::Union(
            SimpleType::Int,
            Box::new(TypeAnnotation::Nullable(SimpleType::Str)),
        );
        assert_eq!(ty.to_string(), "int|str?");
    }

    #[test]
    fn test_simple_type_names_round_trip() {
        for name in ["bool", "int", "float", "str", "json", "any", "list", "map"] {
            let ty = SimpleType::from_name(name).unwrap();
            assert_eq!(ty.name(), name);
        }
        assert_eq!(SimpleType::from_name("string"), None);
    }

    #[test]
    fn test_plain_text_and_map_keys() {
        let literal = StringLiteral {
            quote: QuoteKind::Single,
            parts: vec![
                StringPart::Text("a".to_string()),
                StringPart::Text("b".to_string()),
            ],
        };
        assert_eq!(literal.as_plain_text().as_deref(), Some("ab"));
        assert_eq!(MapKey::String(literal).text().as_deref(), Some("ab"));
        assert_eq!(
            MapKey::Identifier("id".to_string()).text().as_deref(),
            Some("id")
        );
    }
}
