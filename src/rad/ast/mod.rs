//! AST definitions for rad scripts
//!
//! ## Modules
//!
//! - `span` - Position and Span types for source code locations
//! - `position` - Byte offset to line/column conversion
//! - `expressions` - Expression nodes and their supporting shapes
//! - `statements` - Statement nodes, blocks and the source file root
//! - `snapshot` - Normalized tree view consumed by formatters
//! - `traits` - Uniform node descriptions for formatters and tests

pub mod expressions;
pub mod position;
pub mod snapshot;
pub mod span;
pub mod statements;
pub mod traits;

pub use expressions::{
    Argument, BinaryOp, Expression, ExpressionKind, Fixity, MapEntry, MapKey, Parameter, Pattern,
    QuoteKind, SimpleType, StringLiteral, StringPart, SubscriptIndex, TypeAnnotation, UnaryOp,
};
pub use position::SourceLocation;
pub use snapshot::{snapshot_source_file, AstSnapshot};
pub use span::{Position, Span};
pub use statements::{
    AssignOp, Assignment, Block, ClauseBody, DomainBlock, DomainItem, ElifClause,
    ExpressionStatement, FieldModifier, ForStatement, FunctionDefinition, IfStatement, Modifier,
    SortClause, SortDirection, SourceFile, Statement, StatementKind, SwitchClause,
    SwitchStatement, WhileStatement,
};
pub use traits::{AstNode, Spanned};
