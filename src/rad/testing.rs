//! Testing utilities for AST assertions
//!
//! # Parser Testing Guidelines
//!
//! Parser tests use two tools:
//!
//! 1. **[RadSources](crate::rad::processor::rad_sources::RadSources)** for
//!    the curated sample scripts under `samples/`
//! 2. **[assert_ast](fn@assert_ast)** for AST verification
//!
//! Short inline scripts are fine for single constructs. Anything that
//! exercises several constructs together belongs in a sample file, so that
//! grammar changes only need the samples updated.
//!
//! ## Using assert_ast
//!
//! Matching on the tree by hand buries the intent of a test under `match`
//! arms:
//!
//! ```rust,ignore
//! match &file.statements[0].kind {
//!     StatementKind::Assignment(assignment) => match &assignment.value.kind {
//!         ExpressionKind::Binary { op, left, .. } => {
//!             assert_eq!(*op, BinaryOp::Add);
//!             // ... and so on for every child
//!         }
//!         _ => panic!("Expected binary"),
//!     },
//!     _ => panic!("Expected assignment"),
//! }
//! ```
//!
//! The fluent API mirrors the tree instead:
//!
//! ```rust,ignore
//! use rad_syntax::rad::testing::assert_ast;
//!
//! assert_ast(&file).statement(0, |s| {
//!     s.assert_assignment()
//!         .target(|t| { t.identifier("total"); })
//!         .value(|v| {
//!             v.assert_binary(BinaryOp::Add).operands(
//!                 |l| { l.identifier("a"); },
//!                 |r| { r.integer(1); },
//!             );
//!         });
//! });
//! ```
//!
//! Failures name the path to the node that failed:
//!
//! ```text
//! statements[0].value.right: Expected integer 1, found 2
//! ```
//!
//! and count mismatches list what was actually there:
//!
//! ```text
//! file: Expected 2 statements, found 3: [Assignment, If, ExpressionStatement]
//! ```
//!
//! ## Structural equality
//!
//! Spans are never part of structural comparison. [`structure`] serializes a
//! tree to JSON with every `span` field removed, so two parses of differently
//! formatted sources can be compared directly:
//!
//! ```rust,ignore
//! assert_eq!(structure(&parse_source(a)?), structure(&parse_source(b)?));
//! ```

mod testing_assertions;
mod testing_matchers;

pub use testing_assertions::{
    assert_ast, assert_expression, AnonymousFunctionAssertion, AssignmentAssertion,
    BinaryAssertion, BlockAssertion, CallAssertion, ComprehensionAssertion,
    DomainBlockAssertion, DomainItemAssertion, ExpressionAssertion, ExpressionStatementAssertion,
    FieldModifierAssertion, ForAssertion, FunctionAssertion, IfAssertion, ListAssertion,
    MapAssertion, ParameterAssertion, ParametersAssertion, SourceFileAssertion,
    StatementAssertion, StringAssertion, SubscriptAssertion, SwitchAssertion,
    SwitchClauseAssertion, TernaryAssertion, WhileAssertion,
};
pub use testing_matchers::TextMatch;

use serde::Serialize;
use serde_json::Value;

/// Span-free JSON view of any AST node
pub fn structure<T: Serialize + ?Sized>(node: &T) -> Value {
    let mut value = serde_json::to_value(node).unwrap_or(Value::Null);
    strip_spans(&mut value);
    value
}

fn strip_spans(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.remove("span");
            map.values_mut().for_each(strip_spans);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_spans),
        _ => {}
    }
}
